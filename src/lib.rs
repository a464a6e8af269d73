//! 구급차 이송 운영의 월간 원가 배분·수익성·손익분기 계산 엔진.
//! 계산 로직은 `simulation`에 있고 CLI 계층은 이를 호출만 한다.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod logger;
pub mod scenario;
pub mod simulation;
pub mod ui_cli;
pub mod validation;
