use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::simulation::allocation::UnitCosts;
use crate::simulation::break_even::{BreakEven, BreakEvenValue};
use crate::simulation::distribution::{ClientProfitability, Distribution, ServiceProfitability};

/// 한 번의 계산 결과. 매 계산마다 새로 만들어지며 부분 갱신되지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub total_monthly_trips: f64,
    /// 서비스 ID → 1회 단가
    pub unit_costs: BTreeMap<String, f64>,
    pub profitability_by_service: BTreeMap<String, ServiceProfitability>,
    pub profitability_by_client: BTreeMap<String, ClientProfitability>,
    pub total_fixed_cost: f64,
    pub break_even_trips: BreakEvenValue,
    pub break_even_revenue: BreakEvenValue,
}

impl SimulationResult {
    pub(crate) fn assemble(
        unit_costs: UnitCosts,
        distribution: Distribution,
        break_even: BreakEven,
    ) -> Self {
        let total_profit = distribution.total_profit();
        Self {
            total_revenue: distribution.total_revenue,
            total_cost: distribution.total_cost,
            total_profit,
            total_monthly_trips: distribution.total_monthly_trips,
            unit_costs: unit_costs.per_service,
            profitability_by_service: distribution.by_service,
            profitability_by_client: distribution.by_client,
            total_fixed_cost: break_even.total_fixed_cost,
            break_even_trips: break_even.trips,
            break_even_revenue: break_even.revenue,
        }
    }

    /// 이익이 큰 순서로 정렬한 서비스 목록 (표시용).
    pub fn services_by_profit(&self) -> Vec<(&str, &ServiceProfitability)> {
        let mut rows: Vec<_> = self
            .profitability_by_service
            .iter()
            .map(|(id, p)| (id.as_str(), p))
            .collect();
        rows.sort_by(|a, b| b.1.profit.total_cmp(&a.1.profit));
        rows
    }

    /// 손익분기 운행 횟수를 올림한 값. 표시용.
    pub fn break_even_trips_ceil(&self) -> Option<u64> {
        self.break_even_trips
            .finite()
            .map(|t| t.max(0.0).ceil() as u64)
    }
}
