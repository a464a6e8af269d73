use ambulance_cost_simulator::{
    catalog::{Catalog, Category},
    simulation::{
        self, break_even, compute_unit_costs, BreakEvenValue, Client, InputModel,
        MissingTariffPolicy, SimulationError, SimulationOptions,
    },
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let rel = (actual - expected).abs() / denom;
    assert!(
        rel <= rel_tol,
        "{label}: actual={actual}, expected={expected}, rel_err={rel}"
    );
}

/// TAB 1대, 공통비·감가상각 0, 서비스/고객 하나씩.
fn single_vehicle_input(catalog: &Catalog) -> InputModel {
    let mut input = InputModel::default_for(catalog);
    input.operations.basic_vehicles = 1.0;
    input.operations.medicalized_vehicles = 0.0;
    input.shared_fixed.rent = 0.0;
    input.shared_fixed.utilities = 0.0;
    input.shared_fixed.insurance = 0.0;
    input.shared_fixed.licensing = 0.0;
    input.shared_fixed.software = 0.0;
    input.shared_fixed.admin_payroll = 0.0;
    input.depreciation.vehicle = 0.0;
    input.depreciation.basic_equipment = 0.0;
    input.depreciation.medicalized_equipment = 0.0;
    input.service_mix = [("tab_sencillo_d".to_string(), 100.0)].into_iter().collect();
    input.clients = vec![Client::with_default_tariffs(1, "Unico", 100.0, catalog, 1.0)];
    input
}

#[test]
fn zero_trips_yields_no_result() {
    let catalog = Catalog::standard();
    let mut input = InputModel::default_for(&catalog);
    input.operations.trips_per_day = 0.0;
    assert!(simulation::compute(&input, &catalog).expect("compute").is_none());

    input.operations.trips_per_day = 4.0;
    input.operations.operating_days = 0.0;
    assert!(simulation::compute(&input, &catalog).expect("compute").is_none());
}

#[test]
fn single_vehicle_worked_example() {
    let catalog = Catalog::standard();
    let input = single_vehicle_input(&catalog);
    let result = simulation::compute(&input, &catalog)
        .expect("compute")
        .expect("result");

    // 승무원 (1.8M + 1.6M) × 1.52 = 5,168,000, 월 120회, 변동비 25km × 700 + 20,000
    let unit = 5_168_000.0 / 120.0 + 37_500.0;
    assert_close("unit cost", result.unit_costs["tab_sencillo_d"], unit, 1e-9);
    assert_close("trips", result.total_monthly_trips, 120.0, 1e-12);
    assert_close("revenue", result.total_revenue, 120.0 * 150_000.0, 1e-12);
    assert_close("cost", result.total_cost, 120.0 * unit, 1e-9);
    assert_close("fixed", result.total_fixed_cost, 5_168_000.0, 1e-12);

    let expected_trips = 5_168_000.0 / (150_000.0 - 37_500.0);
    match result.break_even_trips {
        BreakEvenValue::Finite(t) => assert_close("break-even trips", t, expected_trips, 1e-9),
        BreakEvenValue::Unbounded => panic!("break-even should be finite"),
    }
    assert_eq!(result.break_even_trips_ceil(), Some(46));
    assert_close(
        "break-even revenue",
        result.break_even_revenue.finite().expect("finite"),
        expected_trips * 150_000.0,
        1e-9,
    );
}

#[test]
fn single_pair_collapses_to_totals() {
    let catalog = Catalog::standard();
    let mut input = single_vehicle_input(&catalog);
    input.service_mix = catalog
        .services()
        .iter()
        .map(|s| (s.id.clone(), 0.0))
        .collect();
    input.service_mix.insert("tab_sencillo_d".into(), 100.0);
    input
        .clients
        .push(Client::with_default_tariffs(2, "Sin Volumen", 0.0, &catalog, 1.3));

    let result = simulation::compute(&input, &catalog)
        .expect("compute")
        .expect("result");

    assert_eq!(result.profitability_by_service.len(), catalog.len());
    let service = &result.profitability_by_service["tab_sencillo_d"];
    let client = &result.profitability_by_client["Unico"];
    assert_close("service revenue", service.revenue, result.total_revenue, 1e-12);
    assert_close("service cost", service.cost, result.total_cost, 1e-12);
    assert_close("client revenue", client.revenue, result.total_revenue, 1e-12);
    assert_close("client cost", client.cost, result.total_cost, 1e-12);
    assert_close("service profit", service.profit, result.total_profit, 1e-12);

    for (id, svc) in &result.profitability_by_service {
        if id != "tab_sencillo_d" {
            assert_eq!(svc.trips, 0.0, "{id}");
            assert_eq!(svc.revenue, 0.0, "{id}");
            assert_eq!(svc.margin_ratio, 0.0, "{id}");
        }
    }
    let idle = &result.profitability_by_client["Sin Volumen"];
    assert_eq!(idle.revenue, 0.0);
    assert_eq!(idle.cost, 0.0);
}

#[test]
fn client_and_service_views_add_up() {
    let catalog = Catalog::standard();
    let input = InputModel::default_for(&catalog);
    let result = simulation::compute(&input, &catalog)
        .expect("compute")
        .expect("result");

    let service_revenue: f64 = result.profitability_by_service.values().map(|s| s.revenue).sum();
    let service_cost: f64 = result.profitability_by_service.values().map(|s| s.cost).sum();
    let client_revenue: f64 = result.profitability_by_client.values().map(|c| c.revenue).sum();
    let client_cost: f64 = result.profitability_by_client.values().map(|c| c.cost).sum();

    assert_close("service revenue", service_revenue, result.total_revenue, 1e-6);
    assert_close("client revenue", client_revenue, result.total_revenue, 1e-6);
    assert_close("service cost", service_cost, result.total_cost, 1e-6);
    assert_close("client cost", client_cost, result.total_cost, 1e-6);
    assert_close(
        "profit identity",
        result.total_profit + result.total_cost,
        result.total_revenue,
        1e-9,
    );
}

#[test]
fn fleet_trips_ignore_category_split() {
    let catalog = Catalog::standard();
    let input = InputModel::default_for(&catalog);
    let result = simulation::compute(&input, &catalog)
        .expect("compute")
        .expect("result");
    // 3대 × 30일 × 4회
    assert_close("fleet trips", result.total_monthly_trips, 360.0, 1e-12);
}

#[test]
fn higher_tariff_raises_revenue_and_profit() {
    let catalog = Catalog::standard();
    let base_input = InputModel::default_for(&catalog);
    let base = simulation::compute(&base_input, &catalog)
        .expect("compute")
        .expect("result");

    let mut input = base_input.clone();
    input.clients[0].tariffs.insert("tam_sencillo_d".into(), 600_000.0);
    let raised = simulation::compute(&input, &catalog)
        .expect("compute")
        .expect("result");

    assert!(raised.total_revenue > base.total_revenue);
    assert!(raised.total_profit > base.total_profit);
    assert_close("cost unchanged", raised.total_cost, base.total_cost, 1e-12);
}

#[test]
fn higher_fuel_cost_raises_total_cost() {
    let catalog = Catalog::standard();
    let base_input = InputModel::default_for(&catalog);
    let base = simulation::compute(&base_input, &catalog)
        .expect("compute")
        .expect("result");

    let mut input = base_input.clone();
    input.set_parameter("fuel_per_km", 900.0).expect("set");
    let raised = simulation::compute(&input, &catalog)
        .expect("compute")
        .expect("result");

    assert!(raised.total_cost > base.total_cost);
    assert_close("revenue unchanged", raised.total_revenue, base.total_revenue, 1e-12);
}

#[test]
fn more_trips_per_day_lowers_unit_cost() {
    let catalog = Catalog::standard();
    let mut input = InputModel::default_for(&catalog);
    let low = compute_unit_costs(&input, &catalog).expect("costs");
    input.operations.trips_per_day = 6.0;
    let high = compute_unit_costs(&input, &catalog).expect("costs");
    for svc in catalog.services() {
        assert!(
            high.service(&svc.id).expect("unit") < low.service(&svc.id).expect("unit"),
            "{}",
            svc.id
        );
    }
}

/// 고정비 항목 하나를 올렸을 때 등급별 단가 변화를 비교한다.
fn unit_costs_after(key: &str, value: f64) -> Vec<(Category, f64, f64)> {
    let catalog = Catalog::standard();
    let base_input = InputModel::default_for(&catalog);
    let base = compute_unit_costs(&base_input, &catalog).expect("costs");
    let mut input = base_input.clone();
    input.set_parameter(key, value).expect("set");
    let raised = compute_unit_costs(&input, &catalog).expect("costs");
    catalog
        .services()
        .iter()
        .map(|svc| {
            (
                svc.category,
                base.service(&svc.id).expect("unit"),
                raised.service(&svc.id).expect("unit"),
            )
        })
        .collect()
}

#[test]
fn fixed_costs_raise_unit_costs_of_their_category() {
    let rows = unit_costs_after("medicalized_physician_salary", 6_000_000.0);
    for (category, before, after) in &rows {
        match category {
            Category::Medicalized => assert!(after > before, "physician {before} -> {after}"),
            Category::Basic => assert_eq!(after, before),
        }
    }

    let rows = unit_costs_after("basic_equipment_depreciation", 900_000.0);
    for (category, before, after) in &rows {
        match category {
            Category::Basic => assert!(after > before, "equipment {before} -> {after}"),
            Category::Medicalized => assert_eq!(after, before),
        }
    }

    let rows = unit_costs_after("rent", 4_000_000.0);
    for (_, before, after) in &rows {
        assert!(after > before, "rent {before} -> {after}");
    }
}

#[test]
fn break_even_trips_cover_fixed_cost() {
    let catalog = Catalog::standard();
    let input = InputModel::default_for(&catalog);
    let costs = compute_unit_costs(&input, &catalog).expect("costs");
    let be = break_even(&input, &catalog, &costs, &SimulationOptions::default()).expect("be");
    let trips = be.trips.finite().expect("finite");
    assert_close(
        "contribution at break-even",
        trips * be.weighted_contribution,
        be.total_fixed_cost,
        1e-9,
    );
}

#[test]
fn tariffs_below_variable_cost_are_unbounded() {
    let catalog = Catalog::standard();
    let mut input = single_vehicle_input(&catalog);
    input.clients[0].tariffs.insert("tab_sencillo_d".into(), 30_000.0);
    let result = simulation::compute(&input, &catalog)
        .expect("compute")
        .expect("result");
    assert!(result.break_even_trips.is_unbounded());
    assert!(result.break_even_revenue.is_unbounded());
    assert_eq!(result.break_even_trips_ceil(), None);
}

#[test]
fn repeated_compute_is_identical() {
    let catalog = Catalog::standard();
    let input = InputModel::default_for(&catalog);
    let first = simulation::compute(&input, &catalog).expect("compute");
    let second = simulation::compute(&input, &catalog).expect("compute");
    assert_eq!(first, second);
}

#[test]
fn missing_tariff_policy_is_respected() {
    let catalog = Catalog::standard();
    let mut input = InputModel::default_for(&catalog);
    input.clients[2].tariffs.remove("tam_fallido");

    assert!(matches!(
        simulation::compute(&input, &catalog),
        Err(SimulationError::MissingTariff { .. })
    ));

    let options = SimulationOptions {
        missing_tariff: MissingTariffPolicy::TreatAsZero,
    };
    let result = simulation::compute_with(&input, &catalog, &options)
        .expect("compute")
        .expect("result");
    assert!(result.total_revenue > 0.0);
}
