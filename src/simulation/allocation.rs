//! 공통 관리비 → 차량 1대 고정비 → 1회 운행 단가 순으로 원가를 배부한다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, Category};
use crate::simulation::input::InputModel;

/// 등급별 원가.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryCosts {
    /// 차량 1대의 월 고정비 [원/월] (공통비 1대분 포함)
    pub fixed_monthly: f64,
    /// 1회 운행 변동비 [원/회]
    pub variable_per_trip: f64,
}

/// 원가 배부 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCosts {
    pub shared_fixed_pool: f64,
    /// 공통비 풀을 전체 차량 수로 나눈 값. 차량이 없으면 0.
    pub shared_fixed_per_vehicle: f64,
    pub basic: CategoryCosts,
    pub medicalized: CategoryCosts,
    /// 차량 1대의 월 운행 횟수 (항상 0보다 크다)
    pub trips_per_vehicle: f64,
    /// 서비스 ID → 1회 단가 [원/회]
    pub per_service: BTreeMap<String, f64>,
}

impl UnitCosts {
    pub fn category(&self, category: Category) -> &CategoryCosts {
        match category {
            Category::Basic => &self.basic,
            Category::Medicalized => &self.medicalized,
        }
    }

    pub fn service(&self, service_id: &str) -> Option<f64> {
        self.per_service.get(service_id).copied()
    }
}

/// 등급별 고정비/변동비와 서비스별 단가를 계산한다.
///
/// 차량 1대의 월 운행 횟수가 0이면 단가를 정의할 수 없으므로 `None`을 돌려준다.
/// 고정비는 차량 한 대가 자기 운행 횟수로 나누어 부담하며, 차량 대수는 여기서
/// 공통비 배부에만 쓰인다.
pub fn compute_unit_costs(input: &InputModel, catalog: &Catalog) -> Option<UnitCosts> {
    let payroll = &input.payroll;
    let burden = 1.0 + payroll.burden_rate_percent / 100.0;
    let crew_basic = (payroll.basic_driver_salary + payroll.basic_assistant_salary) * burden;
    let crew_medicalized = (payroll.medicalized_driver_salary
        + payroll.medicalized_assistant_salary
        + payroll.medicalized_physician_salary)
        * burden;

    let shared_fixed_pool = input.shared_fixed.total();
    let total_vehicles = input.operations.total_vehicles();
    let shared_fixed_per_vehicle = if total_vehicles > 0.0 {
        shared_fixed_pool / total_vehicles
    } else {
        0.0
    };

    let dep = &input.depreciation;
    let depreciation_basic = dep.vehicle + dep.basic_equipment;
    let depreciation_medicalized = dep.vehicle + dep.medicalized_equipment;

    let var = &input.variable;
    let variable_base = (var.fuel_per_km + var.maintenance_per_km) * input.operations.km_per_trip;

    let basic = CategoryCosts {
        fixed_monthly: shared_fixed_per_vehicle + crew_basic + depreciation_basic,
        variable_per_trip: variable_base + var.basic_consumables_per_trip,
    };
    let medicalized = CategoryCosts {
        fixed_monthly: shared_fixed_per_vehicle + crew_medicalized + depreciation_medicalized,
        variable_per_trip: variable_base + var.medicalized_consumables_per_trip,
    };

    let trips_per_vehicle = input.operations.trips_per_vehicle();
    if trips_per_vehicle <= 0.0 || !trips_per_vehicle.is_finite() {
        debug!(trips_per_vehicle, "월 운행 횟수가 0이므로 계산을 건너뜀");
        return None;
    }

    let per_service = catalog
        .services()
        .iter()
        .map(|s| {
            let costs = match s.category {
                Category::Basic => &basic,
                Category::Medicalized => &medicalized,
            };
            let unit = costs.fixed_monthly / trips_per_vehicle + costs.variable_per_trip;
            (s.id.clone(), unit)
        })
        .collect();

    debug!(
        shared_fixed_pool,
        shared_fixed_per_vehicle,
        basic_fixed = basic.fixed_monthly,
        medicalized_fixed = medicalized.fixed_monthly,
        trips_per_vehicle,
        "원가 배부 완료"
    );

    Some(UnitCosts {
        shared_fixed_pool,
        shared_fixed_per_vehicle,
        basic,
        medicalized,
        trips_per_vehicle,
        per_service,
    })
}
