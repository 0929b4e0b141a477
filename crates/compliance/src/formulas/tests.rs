//! Tests for the formula evaluators.

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::config::{CP_AIR, CP_WATER, ENERGY_BALANCE_TOLERANCE, HFG_WATER};
    use crate::error::DomainError;
    use crate::formulas::*;
    use crate::tables::WaterSystem;

    const TOL: f64 = 1e-9;

    // -------------------------------------------------------------------------
    // Contact factor / bypass factor
    // -------------------------------------------------------------------------

    #[test]
    fn test_off_coil_worked_example() {
        // T_in 28, ADP 10, CF 0.82 -> 13.24 (worked example rounds to 13.2)
        let t_off = off_coil_temp_contact(28.0, 10.0, 0.82).unwrap();
        assert!((t_off - 13.24).abs() < TOL);
        assert!(((t_off * 10.0).round() / 10.0 - 13.2).abs() < TOL);
    }

    #[test]
    fn test_bypass_and_contact_forms_agree() {
        let mut rng = ChaCha8Rng::seed_from_u64(7671);
        for _ in 0..1000 {
            let cf: f64 = rng.gen_range(0.0..=1.0);
            let t_in: f64 = rng.gen_range(15.0..40.0);
            let adp: f64 = rng.gen_range(2.0..15.0);
            let bf = bypass_factor(cf).unwrap();
            let via_bf = off_coil_temp_bypass(t_in, adp, bf).unwrap();
            let via_cf = off_coil_temp_contact(t_in, adp, cf).unwrap();
            assert!(
                (via_bf - via_cf).abs() < TOL,
                "cf={cf} t_in={t_in} adp={adp}: {via_bf} vs {via_cf}"
            );
        }
    }

    #[test]
    fn test_contact_factor_boundaries() {
        assert!((off_coil_temp_contact(28.0, 10.0, 0.0).unwrap() - 28.0).abs() < TOL);
        assert!((off_coil_temp_contact(28.0, 10.0, 1.0).unwrap() - 10.0).abs() < TOL);
        assert!((off_coil_temp_bypass(28.0, 10.0, 1.0).unwrap() - 28.0).abs() < TOL);
        assert!((off_coil_temp_bypass(28.0, 10.0, 0.0).unwrap() - 10.0).abs() < TOL);
    }

    #[test]
    fn test_contact_factor_out_of_domain() {
        assert!(matches!(
            off_coil_temp_contact(28.0, 10.0, 1.2),
            Err(DomainError::OutOfRange { .. })
        ));
        assert!(bypass_factor(-0.1).is_err());
        assert!(off_coil_temp_bypass(28.0, f64::NAN, 0.2).is_err());
    }

    #[test]
    fn test_contact_factor_from_temperatures() {
        let cf = contact_factor(28.0, 13.24, 10.0).unwrap();
        assert!((cf - 0.82).abs() < 1e-9);
        assert!(contact_factor(10.0, 10.0, 10.0).is_err());
        // Off-coil colder than the ADP is impossible.
        assert!(contact_factor(28.0, 8.0, 10.0).is_err());
    }

    // -------------------------------------------------------------------------
    // Loads
    // -------------------------------------------------------------------------

    #[test]
    fn test_total_load_worked_example() {
        let q_t = total_load(5.0, 58.0, 37.0).unwrap();
        assert!((q_t - 105.0).abs() < TOL);
    }

    #[test]
    fn test_chart_rounding_within_tolerance() {
        // Q_t=105, Q_s=70.4, Q_L=36.8 -> 107.2, about 2% over.
        let err = load_balance_error(105.0, 70.4, 36.8).unwrap();
        assert!((err - 2.2 / 105.0).abs() < 1e-9);
        assert!(load_balance_within(105.0, 70.4, 36.8, ENERGY_BALANCE_TOLERANCE).unwrap());
        assert!(!load_balance_within(105.0, 90.0, 36.8, ENERGY_BALANCE_TOLERANCE).unwrap());
    }

    #[test]
    fn test_load_balance_requires_non_zero_total() {
        assert!(load_balance_error(0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_sensible_plus_latent_tracks_total() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let m: f64 = rng.gen_range(0.5..20.0);
            let t_on: f64 = rng.gen_range(22.0..35.0);
            let t_off: f64 = rng.gen_range(8.0..18.0);
            let g_off: f64 = rng.gen_range(0.006..0.010);
            let g_on: f64 = g_off + rng.gen_range(0.0..0.006);

            let h_on = moist_air_enthalpy(t_on, g_on).unwrap();
            let h_off = moist_air_enthalpy(t_off, g_off).unwrap();
            let q_t = total_load(m, h_on, h_off).unwrap();

            let humid_cp = CP_AIR + 1.86 * g_on;
            let q_s = sensible_load(m, humid_cp, t_on - t_off).unwrap();
            let q_l = latent_load(m, g_on - g_off, HFG_WATER).unwrap();

            assert!(
                load_balance_within(q_t, q_s, q_l, ENERGY_BALANCE_TOLERANCE).unwrap(),
                "q_t={q_t} q_s={q_s} q_l={q_l}"
            );
        }
    }

    #[test]
    fn test_negative_mass_flow_rejected() {
        assert!(matches!(
            sensible_load(-1.0, CP_AIR, 10.0),
            Err(DomainError::Negative { .. })
        ));
        assert!(total_load(-0.1, 58.0, 37.0).is_err());
        assert!(latent_load(1.0, 0.002, 0.0).is_err());
    }

    // -------------------------------------------------------------------------
    // Water flow
    // -------------------------------------------------------------------------

    #[test]
    fn test_water_flow_worked_example() {
        let m = water_mass_flow(120.0, CP_WATER, 6.0).unwrap();
        assert!((m - 4.77).abs() < 0.005);
    }

    #[test]
    fn test_water_flow_rejects_zero_delta_t() {
        assert!(matches!(
            water_mass_flow(120.0, CP_WATER, 0.0),
            Err(DomainError::NonPositive { .. })
        ));
        assert!(water_mass_flow(120.0, CP_WATER, -6.0).is_err());
    }

    #[test]
    fn test_water_flow_round_trips_through_heat_transfer() {
        let m = water_mass_flow(80.0, CP_WATER, 11.0).unwrap();
        let q = water_heat_transfer(m, CP_WATER, 11.0).unwrap();
        assert!((q - 80.0).abs() < TOL);
    }

    #[test]
    fn test_design_flow_for_chilled_water() {
        let m = design_flow_for(WaterSystem::ChilledWater, 120.0).unwrap();
        assert!((m - 120.0 / (CP_WATER * 6.0)).abs() < TOL);
    }

    // -------------------------------------------------------------------------
    // Loop impedance
    // -------------------------------------------------------------------------

    #[test]
    fn test_site_derating_type_b_32() {
        let site = site_max_zs(1.37, 0.8).unwrap();
        assert!((site - 1.096).abs() < TOL);
        assert!(((site * 100.0).round() / 100.0 - 1.10).abs() < TOL);
    }

    #[test]
    fn test_site_derating_domain() {
        assert!(site_max_zs(1.37, 0.0).is_err());
        assert!(site_max_zs(1.37, 1.5).is_err());
        assert!(site_max_zs(0.0, 0.8).is_err());
    }

    #[test]
    fn test_zs_components_and_headroom() {
        let zs = zs_from_components(0.35, 0.52).unwrap();
        assert!((zs - 0.87).abs() < TOL);
        let headroom = max_r1r2(1.096, 0.35).unwrap();
        assert!((headroom - 0.746).abs() < TOL);
        assert!(max_r1r2(1.096, 1.2).unwrap() < 0.0);
        assert!(zs_from_components(-0.1, 0.5).is_err());
    }

    #[test]
    fn test_max_zs_from_trip_current_reproduces_table() {
        // Type B 32 A trips instantaneously at 5 × In = 160 A.
        let zs = max_zs_from_trip_current(230.0, 0.95, 160.0).unwrap();
        assert!((zs - 1.365_625).abs() < TOL);
        assert!(((zs * 100.0).round() / 100.0 - 1.37).abs() < TOL);
    }

    #[test]
    fn test_prospective_fault_current() {
        let i = prospective_fault_current(230.0, 0.5).unwrap();
        assert!((i - 460.0).abs() < TOL);
        assert!(prospective_fault_current(230.0, 0.0).is_err());
    }

    #[test]
    fn test_expected_r1r2_ring_leg() {
        // 2.5/1.5 T&E, 20 m: (7.41 + 12.10) × 20 × 1.2 / 1000
        let r = expected_r1r2(2.5, 1.5, 20.0).unwrap();
        assert!((r - 0.46824).abs() < TOL);
        assert!(expected_r1r2(2.7, 1.5, 20.0).is_err());
    }

    #[test]
    fn test_tt_touch_voltage() {
        let v = tt_touch_voltage(200.0, 0.03).unwrap();
        assert!((v - 6.0).abs() < TOL);
    }

    // -------------------------------------------------------------------------
    // Cabling and standby
    // -------------------------------------------------------------------------

    #[test]
    fn test_adiabatic() {
        // 1000 A for 0.4 s with k = 115
        let s = adiabatic_min_csa(1000.0, 0.4, 115.0).unwrap();
        assert!((s - (400_000.0_f64).sqrt() / 115.0).abs() < TOL);
        assert!(adiabatic_min_csa(1000.0, 0.4, 0.0).is_err());
    }

    #[test]
    fn test_voltage_drop() {
        let vd = voltage_drop(18.0, 20.0, 25.0).unwrap();
        assert!((vd - 9.0).abs() < TOL);
        let pct = voltage_drop_percent(vd, 230.0).unwrap();
        assert!((pct - 9.0 / 230.0 * 100.0).abs() < TOL);
        assert!((max_voltage_drop(230.0, true).unwrap() - 6.9).abs() < TOL);
        assert!((max_voltage_drop(230.0, false).unwrap() - 11.5).abs() < TOL);
    }

    #[test]
    fn test_standby_battery() {
        // 0.1 A for 24 h + 1.5 A for 0.5 h -> 1.25 × 3.15 = 3.9375 Ah
        let c = standby_battery_capacity(0.1, 24.0, 1.5, 0.5).unwrap();
        assert!((c - 3.9375).abs() < TOL);
        let hours = battery_runtime_hours(7.0, 0.25).unwrap();
        assert!((hours - 28.0).abs() < TOL);
        assert!(battery_runtime_hours(7.0, 0.0).is_err());
    }

    // -------------------------------------------------------------------------
    // Named dispatch
    // -------------------------------------------------------------------------

    #[test]
    fn test_evaluate_formula_by_name() {
        let args = formula_args(&[("q", 120.0), ("cp_w", 4.19), ("delta_t_w", 6.0)]);
        let m = evaluate_formula("water_mass_flow", &args).unwrap();
        assert!((m - 120.0 / 25.14).abs() < TOL);

        let args = formula_args(&[("t_in", 28.0), ("adp", 10.0), ("cf", 0.82)]);
        let t = evaluate_formula("OFF_COIL_TEMP_CONTACT", &args).unwrap();
        assert!((t - 13.24).abs() < TOL);
    }

    #[test]
    fn test_evaluate_formula_optional_derating() {
        let args = formula_args(&[("table_zs", 1.37)]);
        let site = evaluate_formula("site_max_zs", &args).unwrap();
        assert!((site - 1.096).abs() < TOL);

        let args = formula_args(&[("table_zs", 1.37), ("derating", 1.0)]);
        let site = evaluate_formula("site_max_zs", &args).unwrap();
        assert!((site - 1.37).abs() < TOL);
    }

    #[test]
    fn test_evaluate_formula_errors() {
        let err = evaluate_formula("flux_capacitor", &FormulaArgs::new()).unwrap_err();
        assert_eq!(err, DomainError::UnknownFormula("flux_capacitor".to_string()));

        let args = formula_args(&[("t_in", 28.0), ("adp", 10.0)]);
        let err = evaluate_formula("off_coil_temp_contact", &args).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingArgument {
                formula: "off_coil_temp_contact".to_string(),
                argument: "cf".to_string(),
            }
        );
    }

    #[test]
    fn test_every_formula_name_parses() {
        for kind in FormulaKind::ALL {
            assert_eq!(kind.name().parse::<FormulaKind>().unwrap(), kind);
            assert!(!kind.arguments().is_empty());
        }
    }
}
