//! 제공 서비스 카탈로그. 엔진은 읽기만 하며 호출자가 명시적으로 넘겨준다.

use serde::{Deserialize, Serialize};

/// 승무원/장비 등급. 어느 원가 풀을 적용할지 결정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// 기본 이송(TAB): 운전원 + 보조
    Basic,
    /// 의료 이송(TAM): 운전원 + 보조 + 의사
    Medicalized,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Basic, Category::Medicalized];

    pub fn code(&self) -> &'static str {
        match self {
            Category::Basic => "TAB",
            Category::Medicalized => "TAM",
        }
    }
}

/// 서비스 정의. 프로세스 시작 시 한 번 만들어지고 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub id: String,
    pub display_name: String,
    pub category: Category,
    /// 기본 요율 [원/회]
    pub default_tariff: f64,
    /// 기본 믹스 [%]
    pub default_mix_percent: f64,
}

impl ServiceDefinition {
    fn new(
        id: &str,
        display_name: &str,
        category: Category,
        default_tariff: f64,
        default_mix_percent: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            category,
            default_tariff,
            default_mix_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    services: Vec<ServiceDefinition>,
}

impl Catalog {
    pub fn new(services: Vec<ServiceDefinition>) -> Self {
        Self { services }
    }

    /// 표준 10개 서비스 카탈로그.
    pub fn standard() -> Self {
        use Category::{Basic, Medicalized};
        Self::new(vec![
            ServiceDefinition::new("tab_sencillo_d", "TAB Sencillo Diurno", Basic, 150_000.0, 20.0),
            ServiceDefinition::new("tab_sencillo_n", "TAB Sencillo Nocturno", Basic, 180_000.0, 10.0),
            ServiceDefinition::new("tab_redondo_d", "TAB Redondo Diurno", Basic, 200_000.0, 10.0),
            ServiceDefinition::new("tab_redondo_n", "TAB Redondo Nocturno", Basic, 230_000.0, 5.0),
            ServiceDefinition::new("tam_sencillo_d", "TAM Sencillo Diurno", Medicalized, 400_000.0, 20.0),
            ServiceDefinition::new("tam_sencillo_n", "TAM Sencillo Nocturno", Medicalized, 480_000.0, 10.0),
            ServiceDefinition::new("tam_redondo_d", "TAM Redondo Diurno", Medicalized, 550_000.0, 10.0),
            ServiceDefinition::new("tam_redondo_n", "TAM Redondo Nocturno", Medicalized, 660_000.0, 5.0),
            ServiceDefinition::new("tab_fallido", "TAB Fallido", Basic, 90_000.0, 5.0),
            ServiceDefinition::new("tam_fallido", "TAM Fallido", Medicalized, 240_000.0, 5.0),
        ])
    }

    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn find(&self, id: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_default_mix_sums_to_100() {
        let total: f64 = Catalog::standard()
            .services()
            .iter()
            .map(|s| s.default_mix_percent)
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn find_by_id() {
        let catalog = Catalog::standard();
        let svc = catalog.find("tam_redondo_n").expect("service");
        assert_eq!(svc.category, Category::Medicalized);
        assert_eq!(svc.default_tariff, 660_000.0);
        assert!(catalog.find("unknown").is_none());
    }
}
