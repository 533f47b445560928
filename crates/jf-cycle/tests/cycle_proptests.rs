//! Property tests for compression and expansion invariants.

use jf_core::units::{k, pa};
use jf_core::{Tolerances, nearly_equal};
use jf_cycle::{CycleParameters, JouleCycle, StateLabel};
use jf_gas::{CpModel, GasSpecies};
use proptest::prelude::*;

fn species() -> impl Strategy<Value = GasSpecies> {
    prop::sample::select(GasSpecies::ALL.to_vec())
}

fn cp_model() -> impl Strategy<Value = CpModel> {
    prop::sample::select(vec![CpModel::Constant, CpModel::Polynomial])
}

proptest! {
    #[test]
    fn ideal_compression_preserves_entropy(
        gas in species(),
        model in cp_model(),
        p1 in 5e4_f64..5e5,
        t1 in 250.0_f64..400.0,
        ratio in 1.5_f64..30.0,
    ) {
        let mut cycle = JouleCycle::new(CycleParameters::new(gas, model)).unwrap();
        cycle.compute_state_1(pa(p1), k(t1)).unwrap();
        cycle.compute_state_2(pa(p1 * ratio)).unwrap();
        let s1 = cycle.states().get(StateLabel::Inlet1).unwrap().s();
        let s2 = cycle.states().get(StateLabel::Outlet2).unwrap().s();
        prop_assert!(nearly_equal(s1, s2, Tolerances::default()));
    }

    #[test]
    fn real_compression_rises_more_than_isentropic(
        gas in species(),
        model in cp_model(),
        t1 in 250.0_f64..400.0,
        ratio in 1.5_f64..30.0,
        eta in 0.5_f64..0.999,
    ) {
        let params = CycleParameters::new(gas, model).with_efficiencies(eta, 1.0);
        let mut cycle = JouleCycle::new(params).unwrap();
        cycle.compute_state_1(pa(1e5), k(t1)).unwrap();
        cycle.compute_state_2(pa(1e5 * ratio)).unwrap();
        let t2 = cycle.states().get(StateLabel::Outlet2).unwrap().t();
        let t2s = cycle.states().get(StateLabel::Outlet2Isentropic).unwrap().t();
        prop_assert!(t2 - t1 > t2s - t1);
    }

    #[test]
    fn real_expansion_drops_less_than_isentropic(
        gas in species(),
        model in cp_model(),
        t3 in 900.0_f64..1500.0,
        ratio in 1.5_f64..30.0,
        eta in 0.5_f64..0.999,
    ) {
        let params = CycleParameters::new(gas, model).with_efficiencies(1.0, eta);
        let mut cycle = JouleCycle::new(params).unwrap();
        cycle.compute_state_1(pa(1e5), k(300.0)).unwrap();
        cycle.compute_state_2(pa(1e5 * ratio)).unwrap();
        cycle.compute_state_3(pa(1e5 * ratio), k(t3)).unwrap();
        cycle.compute_state_4(pa(1e5)).unwrap();
        let t4 = cycle.states().get(StateLabel::Outlet4).unwrap().t();
        let t4s = cycle.states().get(StateLabel::Outlet4Isentropic).unwrap().t();
        prop_assert!(t3 - t4 < t3 - t4s);
    }
}
