use chrono::{DateTime, Datelike, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed set of ship classes; stored and serialized in upper case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    #[sea_orm(string_value = "TRANSPORT")]
    Transport,
    #[sea_orm(string_value = "MILITARY")]
    Military,
    #[sea_orm(string_value = "MERCHANT")]
    Merchant,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ship")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub prod_date: DateTimeUtc,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Calendar year of production, in UTC.
    pub fn prod_year(&self) -> i32 {
        self.prod_date.year()
    }
}

/// Body of both create and partial-update requests.
///
/// Every field is optional: create requires all but `is_used`, update applies
/// only what is present. Unknown keys (`id`, `rating`) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<ShipType>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub prod_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "used", skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_size: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Model {
        Model {
            id: 7,
            name: "Daedalus".into(),
            planet: "Earth".into(),
            ship_type: ShipType::Military,
            prod_date: Utc.with_ymd_and_hms(3010, 6, 1, 0, 0, 0).unwrap(),
            is_used: false,
            speed: 0.5,
            crew_size: 120,
            rating: 4.0,
        }
    }

    #[test]
    fn model_serializes_with_camel_case_and_epoch_millis() {
        let m = sample();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["shipType"], "MILITARY");
        assert_eq!(json["isUsed"], false);
        assert_eq!(json["crewSize"], 120);
        assert_eq!(json["prodDate"], m.prod_date.timestamp_millis());
    }

    #[test]
    fn prod_year_is_utc_calendar_year() {
        assert_eq!(sample().prod_year(), 3010);
    }

    #[test]
    fn payload_accepts_partial_json() {
        let p: ShipPayload = serde_json::from_str(r#"{"crewSize": 42}"#).unwrap();
        assert_eq!(p.crew_size, Some(42));
        assert_eq!(p.name, None);
        assert_eq!(p.prod_date, None);
    }

    #[test]
    fn payload_ignores_id_and_rating() {
        let p: ShipPayload =
            serde_json::from_str(r#"{"id": 99, "rating": 100.0, "name": "Nostromo"}"#).unwrap();
        assert_eq!(p.name.as_deref(), Some("Nostromo"));
    }

    #[test]
    fn payload_reads_used_alias_and_millis() {
        let millis = Utc.with_ymd_and_hms(2990, 1, 1, 0, 0, 0).unwrap().timestamp_millis();
        let raw = format!(r#"{{"used": true, "prodDate": {millis}, "shipType": "MERCHANT"}}"#);
        let p: ShipPayload = serde_json::from_str(&raw).unwrap();
        assert_eq!(p.is_used, Some(true));
        assert_eq!(p.ship_type, Some(ShipType::Merchant));
        assert_eq!(p.prod_date.map(|d| d.timestamp_millis()), Some(millis));
    }

    #[test]
    fn payload_rejects_unknown_ship_type() {
        let res = serde_json::from_str::<ShipPayload>(r#"{"shipType": "CRUISER"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn payload_skips_absent_fields_when_serialized() {
        let p = ShipPayload { speed: Some(0.3), ..ShipPayload::default() };
        assert_eq!(serde_json::to_value(&p).unwrap(), serde_json::json!({"speed": 0.3}));
    }
}
