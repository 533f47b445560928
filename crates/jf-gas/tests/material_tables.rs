//! Property tables for every registered species under both cp models.

use jf_gas::{CpModel, GasSpecies, IdealGas};

#[test]
fn every_species_gives_physical_tables() {
    let temps = [1200.0, 300.0, 600.0, 900.0, 300.0];
    for species in GasSpecies::ALL {
        for model in [CpModel::Constant, CpModel::Polynomial] {
            let gas = IdealGas::new(species, model);
            let table = gas.material_table(&temps);
            assert_eq!(table.len(), 4, "{species:?}");
            assert!(table.windows(2).all(|w| w[0].t < w[1].t));
            for pack in &table {
                assert!(pack.cp > pack.cv, "{species:?} {model:?} at {}", pack.t);
                assert!(pack.cv > 0.0);
                assert!(pack.kappa > 1.0 && pack.kappa < 1.8);
                assert_eq!(pack.r, species.data().r);
            }
        }
    }
}

#[test]
fn keys_round_trip_through_lookup() {
    for species in GasSpecies::ALL {
        assert_eq!(GasSpecies::from_key(species.key()).unwrap(), species);
    }
    assert!(GasSpecies::from_key("xenon").is_err());
}

#[test]
fn helium_is_monatomic_under_both_models() {
    let constant = IdealGas::new(GasSpecies::Helium, CpModel::Constant);
    let poly = IdealGas::new(GasSpecies::Helium, CpModel::Polynomial);
    assert_eq!(constant.cp(300.0), poly.cp(1500.0));
    assert!((poly.kappa(700.0) - 5.0 / 3.0).abs() < 1e-3);
}
