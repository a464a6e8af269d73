//! 전체 운행량을 서비스 믹스 × 고객 믹스로 나누어 고객별·서비스별 수익을 집계한다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::simulation::allocation::UnitCosts;
use crate::simulation::input::InputModel;
use crate::simulation::{lookup_service, SimulationError, SimulationOptions};

/// 서비스별 수익성.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProfitability {
    pub name: String,
    pub mix_percent: f64,
    /// 월 운행 횟수
    pub trips: f64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    /// 이익/매출. 매출이 0이면 0.
    pub margin_ratio: f64,
}

/// 고객별 수익성.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfitability {
    pub revenue: f64,
    pub cost: f64,
    pub mix_percent: f64,
}

impl ClientProfitability {
    pub fn profit(&self) -> f64 {
        self.revenue - self.cost
    }

    pub fn margin_ratio(&self) -> f64 {
        if self.revenue > 0.0 {
            self.profit() / self.revenue
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// 차량 1대 운행 횟수 × 전체 차량 수 (등급 구분 없음)
    pub total_monthly_trips: f64,
    pub by_service: BTreeMap<String, ServiceProfitability>,
    /// 고객 이름 → 수익성. 이름이 같은 고객은 한 버킷으로 합산된다.
    pub by_client: BTreeMap<String, ClientProfitability>,
    pub total_revenue: f64,
    pub total_cost: f64,
}

impl Distribution {
    pub fn total_profit(&self) -> f64 {
        self.total_revenue - self.total_cost
    }
}

/// 서비스 믹스 × 고객 믹스 교차곱을 따라 매출과 원가를 분배한다.
///
/// 전체 운행량은 등급과 무관한 하나의 풀로 보고, TAB/TAM 비중은 믹스만으로 정해진다.
/// 실제 차량 구성과 달라도 보정하지 않는다.
pub fn distribute(
    input: &InputModel,
    catalog: &Catalog,
    unit_costs: &UnitCosts,
    options: &SimulationOptions,
) -> Result<Distribution, SimulationError> {
    let total_monthly_trips =
        unit_costs.trips_per_vehicle * input.operations.total_vehicles();

    let mut by_client: BTreeMap<String, ClientProfitability> = BTreeMap::new();
    for client in &input.clients {
        by_client
            .entry(client.name.clone())
            .and_modify(|bucket| bucket.mix_percent += client.mix_percent)
            .or_insert(ClientProfitability {
                revenue: 0.0,
                cost: 0.0,
                mix_percent: client.mix_percent,
            });
    }

    let mut by_service = BTreeMap::new();
    let mut total_revenue = 0.0;
    let mut total_cost = 0.0;

    for (service_id, &service_mix) in &input.service_mix {
        let service = lookup_service(catalog, service_id)?;
        let unit_cost = unit_costs
            .service(service_id)
            .ok_or_else(|| SimulationError::UnknownService(service_id.clone()))?;
        let service_trips = total_monthly_trips * (service_mix / 100.0);

        let mut service_revenue = 0.0;
        for client in &input.clients {
            let tariff = options.tariff(client, service_id)?;
            let trips = service_trips * (client.mix_percent / 100.0);
            let revenue = trips * tariff;
            service_revenue += revenue;
            if let Some(bucket) = by_client.get_mut(&client.name) {
                bucket.revenue += revenue;
                bucket.cost += trips * unit_cost;
            }
        }

        let service_cost = service_trips * unit_cost;
        let profit = service_revenue - service_cost;
        let margin_ratio = if service_revenue > 0.0 {
            profit / service_revenue
        } else {
            0.0
        };
        by_service.insert(
            service_id.clone(),
            ServiceProfitability {
                name: service.display_name.clone(),
                mix_percent: service_mix,
                trips: service_trips,
                revenue: service_revenue,
                cost: service_cost,
                profit,
                margin_ratio,
            },
        );
        total_revenue += service_revenue;
        total_cost += service_cost;
    }

    debug!(
        total_monthly_trips,
        services = by_service.len(),
        clients = by_client.len(),
        "매출/원가 분배 완료"
    );

    Ok(Distribution {
        total_monthly_trips,
        by_service,
        by_client,
        total_revenue,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::allocation::compute_unit_costs;
    use crate::simulation::MissingTariffPolicy;

    fn run(input: &InputModel, options: &SimulationOptions) -> Result<Distribution, SimulationError> {
        let catalog = Catalog::standard();
        let costs = compute_unit_costs(input, &catalog).expect("costs");
        distribute(input, &catalog, &costs, options)
    }

    #[test]
    fn zero_revenue_service_has_zero_margin() {
        let catalog = Catalog::standard();
        let mut input = InputModel::default_for(&catalog);
        for client in &mut input.clients {
            client.tariffs.insert("tab_fallido".into(), 0.0);
        }
        let dist = run(&input, &SimulationOptions::default()).expect("dist");
        let failed = &dist.by_service["tab_fallido"];
        assert_eq!(failed.revenue, 0.0);
        assert_eq!(failed.margin_ratio, 0.0);
        assert!(failed.profit < 0.0);
    }

    #[test]
    fn missing_tariff_is_reported_under_strict_policy() {
        let catalog = Catalog::standard();
        let mut input = InputModel::default_for(&catalog);
        input.clients[0].tariffs.remove("tam_fallido");
        let err = run(&input, &SimulationOptions::default()).unwrap_err();
        match err {
            SimulationError::MissingTariff { client, service } => {
                assert_eq!(client, "Aseguradora Alfa");
                assert_eq!(service, "tam_fallido");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_tariff_counts_as_zero_when_allowed() {
        let catalog = Catalog::standard();
        let mut input = InputModel::default_for(&catalog);
        input.clients[0].tariffs.remove("tam_fallido");
        let options = SimulationOptions {
            missing_tariff: MissingTariffPolicy::TreatAsZero,
        };
        let dist = run(&input, &options).expect("dist");
        // 나머지 두 고객(30%, 20%)만 매출을 낸다
        let svc = &dist.by_service["tam_fallido"];
        let expected = svc.trips * (0.3 * 288_000.0 + 0.2 * 216_000.0);
        assert!((svc.revenue - expected).abs() < 1e-6);
    }

    #[test]
    fn unknown_service_in_mix_is_rejected() {
        let catalog = Catalog::standard();
        let mut input = InputModel::default_for(&catalog);
        input.service_mix.insert("helicopter".into(), 1.0);
        assert!(matches!(
            run(&input, &SimulationOptions::default()),
            Err(SimulationError::UnknownService(id)) if id == "helicopter"
        ));
    }

    #[test]
    fn clients_with_same_name_share_a_bucket() {
        let catalog = Catalog::standard();
        let mut input = InputModel::default_for(&catalog);
        input.clients[2].name = "Aseguradora Alfa".into();
        let dist = run(&input, &SimulationOptions::default()).expect("dist");
        assert_eq!(dist.by_client.len(), 2);
        assert!((dist.by_client["Aseguradora Alfa"].mix_percent - 70.0).abs() < 1e-9);
    }
}
