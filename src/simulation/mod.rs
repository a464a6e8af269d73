//! 구급차 이송 운영의 월간 원가 배부·수익성·손익분기 계산 엔진.
//!
//! 입력 스냅샷과 카탈로그를 불변 참조로 받아 매번 새 결과를 만든다.
//! 배부 → 분배 → 손익분기 순으로 진행하며 내부 상태는 없다.

pub mod allocation;
pub mod break_even;
pub mod distribution;
pub mod input;
pub mod result;

pub use allocation::{compute_unit_costs, CategoryCosts, UnitCosts};
pub use break_even::{break_even, BreakEven, BreakEvenValue};
pub use distribution::{distribute, ClientProfitability, Distribution, ServiceProfitability};
pub use input::{Client, InputError, InputModel, PARAMETER_KEYS};
pub use result::SimulationResult;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, ServiceDefinition};

/// 계산 중 발생 가능한 오류. 모두 호출자 입력 문제다.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("고객 '{client}'의 요율표에 서비스 '{service}' 요율이 없습니다")]
    MissingTariff { client: String, service: String },
    #[error("카탈로그에 없는 서비스가 믹스에 있습니다: {0}")]
    UnknownService(String),
}

/// 요율표에 항목이 없을 때의 처리 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTariffPolicy {
    /// 오류로 중단한다.
    #[default]
    Strict,
    /// 0원으로 간주한다. 예전 스냅샷 호환용.
    TreatAsZero,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationOptions {
    pub missing_tariff: MissingTariffPolicy,
}

impl SimulationOptions {
    pub(crate) fn tariff(
        &self,
        client: &Client,
        service_id: &str,
    ) -> Result<f64, SimulationError> {
        match (client.tariff(service_id), self.missing_tariff) {
            (Some(price), _) => Ok(price),
            (None, MissingTariffPolicy::TreatAsZero) => Ok(0.0),
            (None, MissingTariffPolicy::Strict) => Err(SimulationError::MissingTariff {
                client: client.name.clone(),
                service: service_id.to_string(),
            }),
        }
    }
}

pub(crate) fn lookup_service<'a>(
    catalog: &'a Catalog,
    service_id: &str,
) -> Result<&'a ServiceDefinition, SimulationError> {
    catalog
        .find(service_id)
        .ok_or_else(|| SimulationError::UnknownService(service_id.to_string()))
}

/// 기본 옵션(엄격한 요율 조회)으로 계산한다.
pub fn compute(
    input: &InputModel,
    catalog: &Catalog,
) -> Result<Option<SimulationResult>, SimulationError> {
    compute_with(input, catalog, &SimulationOptions::default())
}

/// 전체 계산을 수행한다.
///
/// 차량 1대의 월 운행 횟수가 0이면 `Ok(None)`("결과 없음")을 돌려준다.
/// 호출자는 이 경우 이전 결과를 그대로 유지한다.
pub fn compute_with(
    input: &InputModel,
    catalog: &Catalog,
    options: &SimulationOptions,
) -> Result<Option<SimulationResult>, SimulationError> {
    let Some(unit_costs) = compute_unit_costs(input, catalog) else {
        return Ok(None);
    };
    let distribution = distribute(input, catalog, &unit_costs, options)?;
    let break_even = break_even(input, catalog, &unit_costs, options)?;
    debug!(
        revenue = distribution.total_revenue,
        cost = distribution.total_cost,
        "시뮬레이션 완료"
    );
    Ok(Some(SimulationResult::assemble(
        unit_costs,
        distribution,
        break_even,
    )))
}
