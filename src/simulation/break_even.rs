//! 가중 공헌이익 기반 손익분기 운행량/매출.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, Category};
use crate::simulation::allocation::UnitCosts;
use crate::simulation::input::InputModel;
use crate::simulation::{lookup_service, SimulationError, SimulationOptions};

/// 손익분기 값. 가중 공헌이익이 0 이하이면 유한한 손익분기점이 없다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BreakEvenValue {
    Finite(f64),
    Unbounded,
}

impl BreakEvenValue {
    pub fn finite(&self) -> Option<f64> {
        match self {
            BreakEvenValue::Finite(v) => Some(*v),
            BreakEvenValue::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, BreakEvenValue::Unbounded)
    }
}

impl fmt::Display for BreakEvenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEvenValue::Finite(v) => write!(f, "{v:.0}"),
            BreakEvenValue::Unbounded => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEven {
    /// 운영 전체 월 고정비 (공통비는 한 번만 포함)
    pub total_fixed_cost: f64,
    /// 믹스 가중 1회당 공헌이익
    pub weighted_contribution: f64,
    /// 믹스 가중 1회당 평균 요율
    pub weighted_avg_price: f64,
    pub trips: BreakEvenValue,
    pub revenue: BreakEvenValue,
}

/// 손익분기 운행량과 매출을 계산한다.
pub fn break_even(
    input: &InputModel,
    catalog: &Catalog,
    unit_costs: &UnitCosts,
    options: &SimulationOptions,
) -> Result<BreakEven, SimulationError> {
    let ops = &input.operations;
    // 등급별 고정비에는 공통비 1대분이 이미 들어 있으므로 빼고 풀을 한 번만 더한다.
    let total_fixed_cost = unit_costs.basic.fixed_monthly * ops.basic_vehicles
        + unit_costs.medicalized.fixed_monthly * ops.medicalized_vehicles
        - unit_costs.shared_fixed_per_vehicle * ops.total_vehicles()
        + unit_costs.shared_fixed_pool;

    let mut weighted_contribution = 0.0;
    let mut weighted_avg_price = 0.0;
    for (service_id, &service_mix) in &input.service_mix {
        let service = lookup_service(catalog, service_id)?;
        let mut weighted_price = 0.0;
        for client in &input.clients {
            weighted_price += options.tariff(client, service_id)? * (client.mix_percent / 100.0);
        }
        let variable = match service.category {
            Category::Basic => unit_costs.basic.variable_per_trip,
            Category::Medicalized => unit_costs.medicalized.variable_per_trip,
        };
        weighted_contribution += (weighted_price - variable) * (service_mix / 100.0);
        weighted_avg_price += weighted_price * (service_mix / 100.0);
    }

    let (trips, revenue) = if weighted_contribution > 0.0 {
        let trips = total_fixed_cost / weighted_contribution;
        (
            BreakEvenValue::Finite(trips),
            BreakEvenValue::Finite(trips * weighted_avg_price),
        )
    } else {
        (BreakEvenValue::Unbounded, BreakEvenValue::Unbounded)
    };

    debug!(
        total_fixed_cost,
        weighted_contribution,
        weighted_avg_price,
        trips = %trips,
        "손익분기 계산 완료"
    );

    Ok(BreakEven {
        total_fixed_cost,
        weighted_contribution,
        weighted_avg_price,
        trips,
        revenue,
    })
}
