use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// 입력 편집 시 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("알 수 없는 파라미터: {0}")]
    UnknownParameter(String),
    #[error("알 수 없는 서비스: {0}")]
    UnknownService(String),
    #[error("알 수 없는 고객 ID: {0}")]
    UnknownClient(u64),
    #[error("값이 유한한 수가 아닙니다: {0}")]
    NotFinite(f64),
}

/// 월 급여 [원/월]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollCosts {
    pub basic_driver_salary: f64,
    pub basic_assistant_salary: f64,
    pub medicalized_driver_salary: f64,
    pub medicalized_assistant_salary: f64,
    pub medicalized_physician_salary: f64,
    /// 4대보험/퇴직급여 등 급여 부담률 [%]
    pub burden_rate_percent: f64,
}

/// 차량 수와 무관하게 발생하는 공통 고정비 [원/월]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedFixedCosts {
    pub rent: f64,
    pub utilities: f64,
    pub insurance: f64,
    pub licensing: f64,
    pub software: f64,
    pub admin_payroll: f64,
}

impl SharedFixedCosts {
    pub fn total(&self) -> f64 {
        self.rent + self.utilities + self.insurance + self.licensing + self.software + self.admin_payroll
    }
}

/// 월 감가상각비 [원/월]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depreciation {
    /// 차량 1대당 (두 등급 공통)
    pub vehicle: f64,
    pub basic_equipment: f64,
    pub medicalized_equipment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableCosts {
    /// [원/km]
    pub fuel_per_km: f64,
    /// [원/km]
    pub maintenance_per_km: f64,
    /// [원/회]
    pub basic_consumables_per_trip: f64,
    /// [원/회]
    pub medicalized_consumables_per_trip: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operations {
    pub basic_vehicles: f64,
    pub medicalized_vehicles: f64,
    /// 월 운행일수
    pub operating_days: f64,
    /// 차량 1대당 일 평균 운행 횟수
    pub trips_per_day: f64,
    pub km_per_trip: f64,
}

impl Operations {
    pub fn total_vehicles(&self) -> f64 {
        self.basic_vehicles + self.medicalized_vehicles
    }

    pub fn trips_per_vehicle(&self) -> f64 {
        self.operating_days * self.trips_per_day
    }
}

/// 요금을 지불하는 고객(보험사, 기업 계약 등).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: u64,
    pub name: String,
    /// 전체 운행 중 이 고객에게 귀속되는 비율 [%]
    pub mix_percent: f64,
    /// 서비스 ID → 요율 [원/회]
    pub tariffs: BTreeMap<String, f64>,
}

impl Client {
    /// 카탈로그 기본 요율에 배수를 곱한 요율표로 고객을 만든다.
    pub fn with_default_tariffs(
        id: u64,
        name: impl Into<String>,
        mix_percent: f64,
        catalog: &Catalog,
        tariff_factor: f64,
    ) -> Self {
        let tariffs = catalog
            .services()
            .iter()
            .map(|s| (s.id.clone(), s.default_tariff * tariff_factor))
            .collect();
        Self {
            id,
            name: name.into(),
            mix_percent,
            tariffs,
        }
    }

    pub fn tariff(&self, service_id: &str) -> Option<f64> {
        self.tariffs.get(service_id).copied()
    }
}

/// 엔진 입력 전체. 호출자가 소유하고 계산 시 불변 참조로 넘긴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputModel {
    pub payroll: PayrollCosts,
    pub shared_fixed: SharedFixedCosts,
    pub depreciation: Depreciation,
    pub variable: VariableCosts,
    pub operations: Operations,
    /// 서비스 ID → 믹스 [%]
    pub service_mix: BTreeMap<String, f64>,
    pub clients: Vec<Client>,
    /// 파라미터 키 → 출처 URL. 엔진은 읽지 않는다.
    #[serde(default)]
    pub source_links: BTreeMap<String, String>,
}

/// 이름 ↔ 필드 매핑을 한 곳에서 정의하고 키 목록과 접근자를 함께 생성한다.
macro_rules! parameter_table {
    ($($key:literal => $($field:ident).+),* $(,)?) => {
        /// 이름으로 편집 가능한 수치 파라미터 키 목록.
        pub const PARAMETER_KEYS: &[&str] = &[$($key),*];

        impl InputModel {
            fn field(&self, key: &str) -> Option<f64> {
                match key {
                    $($key => Some(self.$($field).+),)*
                    _ => None,
                }
            }

            fn field_mut(&mut self, key: &str) -> Option<&mut f64> {
                match key {
                    $($key => Some(&mut self.$($field).+),)*
                    _ => None,
                }
            }
        }
    };
}

parameter_table! {
    "basic_driver_salary" => payroll.basic_driver_salary,
    "basic_assistant_salary" => payroll.basic_assistant_salary,
    "medicalized_driver_salary" => payroll.medicalized_driver_salary,
    "medicalized_assistant_salary" => payroll.medicalized_assistant_salary,
    "medicalized_physician_salary" => payroll.medicalized_physician_salary,
    "burden_rate_percent" => payroll.burden_rate_percent,
    "admin_payroll" => shared_fixed.admin_payroll,
    "rent" => shared_fixed.rent,
    "utilities" => shared_fixed.utilities,
    "insurance" => shared_fixed.insurance,
    "licensing" => shared_fixed.licensing,
    "software" => shared_fixed.software,
    "vehicle_depreciation" => depreciation.vehicle,
    "basic_equipment_depreciation" => depreciation.basic_equipment,
    "medicalized_equipment_depreciation" => depreciation.medicalized_equipment,
    "fuel_per_km" => variable.fuel_per_km,
    "maintenance_per_km" => variable.maintenance_per_km,
    "basic_consumables_per_trip" => variable.basic_consumables_per_trip,
    "medicalized_consumables_per_trip" => variable.medicalized_consumables_per_trip,
    "basic_vehicles" => operations.basic_vehicles,
    "medicalized_vehicles" => operations.medicalized_vehicles,
    "operating_days" => operations.operating_days,
    "trips_per_day" => operations.trips_per_day,
    "km_per_trip" => operations.km_per_trip,
}

impl InputModel {
    /// 기본 시나리오: 기본 3대(TAB 2, TAM 1), 고객 3곳.
    pub fn default_for(catalog: &Catalog) -> Self {
        Self {
            payroll: PayrollCosts {
                basic_driver_salary: 1_800_000.0,
                basic_assistant_salary: 1_600_000.0,
                medicalized_driver_salary: 1_800_000.0,
                medicalized_assistant_salary: 1_600_000.0,
                medicalized_physician_salary: 5_000_000.0,
                burden_rate_percent: 52.0,
            },
            shared_fixed: SharedFixedCosts {
                rent: 2_500_000.0,
                utilities: 800_000.0,
                insurance: 1_000_000.0,
                licensing: 500_000.0,
                software: 700_000.0,
                admin_payroll: 6_000_000.0,
            },
            depreciation: Depreciation {
                vehicle: 2_000_000.0,
                basic_equipment: 500_000.0,
                medicalized_equipment: 1_500_000.0,
            },
            variable: VariableCosts {
                fuel_per_km: 500.0,
                maintenance_per_km: 200.0,
                basic_consumables_per_trip: 20_000.0,
                medicalized_consumables_per_trip: 80_000.0,
            },
            operations: Operations {
                basic_vehicles: 2.0,
                medicalized_vehicles: 1.0,
                operating_days: 30.0,
                trips_per_day: 4.0,
                km_per_trip: 25.0,
            },
            service_mix: catalog
                .services()
                .iter()
                .map(|s| (s.id.clone(), s.default_mix_percent))
                .collect(),
            clients: vec![
                Client::with_default_tariffs(1, "Aseguradora Alfa", 50.0, catalog, 1.0),
                Client::with_default_tariffs(2, "Cliente Particular", 30.0, catalog, 1.2),
                Client::with_default_tariffs(3, "Convenio Empresa", 20.0, catalog, 0.9),
            ],
            source_links: BTreeMap::new(),
        }
    }

    /// 이름으로 파라미터 값을 조회한다.
    pub fn parameter(&self, key: &str) -> Option<f64> {
        self.field(key)
    }

    /// 이름으로 파라미터 값을 설정한다.
    pub fn set_parameter(&mut self, key: &str, value: f64) -> Result<(), InputError> {
        if !value.is_finite() {
            return Err(InputError::NotFinite(value));
        }
        let field = self
            .field_mut(key)
            .ok_or_else(|| InputError::UnknownParameter(key.to_string()))?;
        *field = value;
        Ok(())
    }

    pub fn set_service_mix(
        &mut self,
        catalog: &Catalog,
        service_id: &str,
        mix_percent: f64,
    ) -> Result<(), InputError> {
        if catalog.find(service_id).is_none() {
            return Err(InputError::UnknownService(service_id.to_string()));
        }
        if !mix_percent.is_finite() {
            return Err(InputError::NotFinite(mix_percent));
        }
        self.service_mix.insert(service_id.to_string(), mix_percent);
        Ok(())
    }

    /// 파라미터 출처 링크를 기록한다. 빈 문자열이면 링크를 지운다.
    pub fn set_source_link(&mut self, key: &str, url: &str) -> Result<(), InputError> {
        if !PARAMETER_KEYS.contains(&key) {
            return Err(InputError::UnknownParameter(key.to_string()));
        }
        let url = url.trim();
        if url.is_empty() {
            self.source_links.remove(key);
        } else {
            self.source_links.insert(key.to_string(), url.to_string());
        }
        Ok(())
    }

    /// 새 고객을 믹스 0%, 카탈로그 기본 요율로 추가하고 ID를 돌려준다.
    pub fn add_client(&mut self, catalog: &Catalog, name: Option<&str>) -> u64 {
        let id = self.clients.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("Nuevo Cliente {}", self.clients.len() + 1),
        };
        self.clients
            .push(Client::with_default_tariffs(id, name, 0.0, catalog, 1.0));
        id
    }

    pub fn remove_client(&mut self, id: u64) -> Result<Client, InputError> {
        let pos = self
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or(InputError::UnknownClient(id))?;
        Ok(self.clients.remove(pos))
    }

    pub fn client_mut(&mut self, id: u64) -> Result<&mut Client, InputError> {
        self.clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(InputError::UnknownClient(id))
    }
}
