//! 믹스 합계 점검. 엔진은 거부하지 않으며 표시 계층에서 경고로만 쓴다.

use serde::Serialize;

use crate::simulation::InputModel;

/// 믹스 합계 경고 허용 오차 [%p]
pub const DEFAULT_MIX_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MixWarning {
    /// 서비스 믹스 합계가 100%가 아님
    ServiceMixTotal { total: f64 },
    /// 고객 믹스 합계가 100%가 아님
    ClientMixTotal { total: f64 },
    /// 고객 요율표에 믹스 대상 서비스가 없음
    IncompleteTariffSheet { client: String, missing: Vec<String> },
}

pub fn service_mix_total(input: &InputModel) -> f64 {
    input.service_mix.values().sum()
}

pub fn client_mix_total(input: &InputModel) -> f64 {
    input.clients.iter().map(|c| c.mix_percent).sum()
}

/// 믹스 합계와 요율표 누락을 점검해 경고 목록을 돌려준다.
pub fn check_mix(input: &InputModel, tolerance: f64) -> Vec<MixWarning> {
    let mut warnings = Vec::new();
    let services = service_mix_total(input);
    if (services - 100.0).abs() > tolerance {
        warnings.push(MixWarning::ServiceMixTotal { total: services });
    }
    let clients = client_mix_total(input);
    if (clients - 100.0).abs() > tolerance {
        warnings.push(MixWarning::ClientMixTotal { total: clients });
    }
    for client in &input.clients {
        let missing: Vec<String> = input
            .service_mix
            .keys()
            .filter(|id| !client.tariffs.contains_key(*id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            warnings.push(MixWarning::IncompleteTariffSheet {
                client: client.name.clone(),
                missing,
            });
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn default_input_has_no_warnings() {
        let input = InputModel::default_for(&Catalog::standard());
        assert!(check_mix(&input, DEFAULT_MIX_TOLERANCE).is_empty());
    }

    #[test]
    fn totals_outside_tolerance_are_reported() {
        let catalog = Catalog::standard();
        let mut input = InputModel::default_for(&catalog);
        input.clients[0].mix_percent = 45.0;
        input.service_mix.insert("tab_fallido".into(), 5.05);
        let warnings = check_mix(&input, DEFAULT_MIX_TOLERANCE);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], MixWarning::ClientMixTotal { total } if (total - 95.0).abs() < 1e-9));
    }

    #[test]
    fn incomplete_tariff_sheet_lists_services() {
        let catalog = Catalog::standard();
        let mut input = InputModel::default_for(&catalog);
        input.clients[1].tariffs.remove("tab_redondo_n");
        let warnings = check_mix(&input, DEFAULT_MIX_TOLERANCE);
        assert_eq!(
            warnings,
            vec![MixWarning::IncompleteTariffSheet {
                client: "Cliente Particular".into(),
                missing: vec!["tab_redondo_n".into()],
            }]
        );
    }
}
