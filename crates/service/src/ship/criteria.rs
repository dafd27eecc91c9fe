//! Filter parameters → predicate.
//!
//! Each optional parameter (or min/max pair) contributes zero or one
//! [`ShipCriterion`]; the predicate is their conjunction. The same predicate
//! is rendered to a SeaORM [`Condition`] for SQL stores and evaluated
//! directly against models for the in-memory store.

use chrono::{DateTime, Utc};
use models::ship::{self, ShipType};
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ColumnTrait, Condition, Value};
use serde::Deserialize;

/// Optional listing filters as they arrive on the query string.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipFilter {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    /// Epoch milliseconds, inclusive lower bound on `prodDate`
    pub after: Option<i64>,
    /// Epoch milliseconds, inclusive upper bound on `prodDate`
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

/// Inclusive range constraint built from an optional min/max pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeBound<T> {
    AtLeast(T),
    AtMost(T),
    Between(T, T),
}

impl<T: PartialOrd + Copy> RangeBound<T> {
    /// `None` when both limits are absent. Limits are not reordered.
    pub fn from_limits(min: Option<T>, max: Option<T>) -> Option<Self> {
        match (min, max) {
            (None, None) => None,
            (None, Some(max)) => Some(RangeBound::AtMost(max)),
            (Some(min), None) => Some(RangeBound::AtLeast(min)),
            (Some(min), Some(max)) => Some(RangeBound::Between(min, max)),
        }
    }

    pub fn contains(&self, value: T) -> bool {
        match *self {
            RangeBound::AtLeast(min) => value >= min,
            RangeBound::AtMost(max) => value <= max,
            RangeBound::Between(min, max) => min <= value && value <= max,
        }
    }
}

impl<T: Into<Value> + Copy> RangeBound<T> {
    fn to_expr(self, column: ship::Column) -> SimpleExpr {
        match self {
            RangeBound::AtLeast(min) => column.gte(min),
            RangeBound::AtMost(max) => column.lte(max),
            RangeBound::Between(min, max) => column.between(min, max),
        }
    }
}

/// A single constraint contributed by one filter parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ShipCriterion {
    NameContains(String),
    PlanetContains(String),
    TypeIs(ShipType),
    ProdDate(RangeBound<DateTime<Utc>>),
    UsedIs(bool),
    Speed(RangeBound<f64>),
    CrewSize(RangeBound<i32>),
    Rating(RangeBound<f64>),
}

impl ShipCriterion {
    pub fn matches(&self, ship: &ship::Model) -> bool {
        match self {
            ShipCriterion::NameContains(part) => ship.name.contains(part.as_str()),
            ShipCriterion::PlanetContains(part) => ship.planet.contains(part.as_str()),
            ShipCriterion::TypeIs(t) => ship.ship_type == *t,
            ShipCriterion::ProdDate(range) => range.contains(ship.prod_date),
            ShipCriterion::UsedIs(used) => ship.is_used == *used,
            ShipCriterion::Speed(range) => range.contains(ship.speed),
            ShipCriterion::CrewSize(range) => range.contains(ship.crew_size),
            ShipCriterion::Rating(range) => range.contains(ship.rating),
        }
    }

    pub fn to_expr(&self) -> SimpleExpr {
        match self {
            ShipCriterion::NameContains(part) => ship::Column::Name.contains(part.as_str()),
            ShipCriterion::PlanetContains(part) => ship::Column::Planet.contains(part.as_str()),
            ShipCriterion::TypeIs(t) => ship::Column::ShipType.eq(*t),
            ShipCriterion::ProdDate(range) => range.to_expr(ship::Column::ProdDate),
            ShipCriterion::UsedIs(used) => ship::Column::IsUsed.eq(*used),
            ShipCriterion::Speed(range) => range.to_expr(ship::Column::Speed),
            ShipCriterion::CrewSize(range) => range.to_expr(ship::Column::CrewSize),
            ShipCriterion::Rating(range) => range.to_expr(ship::Column::Rating),
        }
    }
}

/// Conjunction of criteria; empty means "every ship".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShipPredicate {
    criteria: Vec<ShipCriterion>,
}

impl ShipPredicate {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn and(mut self, criterion: ShipCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn criteria(&self) -> &[ShipCriterion] {
        &self.criteria
    }

    pub fn is_unconstrained(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, ship: &ship::Model) -> bool {
        self.criteria.iter().all(|c| c.matches(ship))
    }

    pub fn to_condition(&self) -> Condition {
        self.criteria
            .iter()
            .fold(Condition::all(), |cond, c| cond.add(c.to_expr()))
    }
}

type CriterionRule = fn(&ShipFilter) -> Option<ShipCriterion>;

/// One rule per filter, in the order their constraints are combined.
const RULES: [CriterionRule; 8] = [
    by_name,
    by_planet,
    by_ship_type,
    by_prod_date,
    by_used,
    by_speed,
    by_crew_size,
    by_rating,
];

fn by_name(f: &ShipFilter) -> Option<ShipCriterion> {
    f.name.clone().map(ShipCriterion::NameContains)
}

fn by_planet(f: &ShipFilter) -> Option<ShipCriterion> {
    f.planet.clone().map(ShipCriterion::PlanetContains)
}

fn by_ship_type(f: &ShipFilter) -> Option<ShipCriterion> {
    f.ship_type.map(ShipCriterion::TypeIs)
}

fn by_prod_date(f: &ShipFilter) -> Option<ShipCriterion> {
    RangeBound::from_limits(f.after.map(instant_from_millis), f.before.map(instant_from_millis))
        .map(ShipCriterion::ProdDate)
}

fn by_used(f: &ShipFilter) -> Option<ShipCriterion> {
    f.is_used.map(ShipCriterion::UsedIs)
}

fn by_speed(f: &ShipFilter) -> Option<ShipCriterion> {
    RangeBound::from_limits(f.min_speed, f.max_speed).map(ShipCriterion::Speed)
}

fn by_crew_size(f: &ShipFilter) -> Option<ShipCriterion> {
    RangeBound::from_limits(f.min_crew_size, f.max_crew_size).map(ShipCriterion::CrewSize)
}

fn by_rating(f: &ShipFilter) -> Option<ShipCriterion> {
    RangeBound::from_limits(f.min_rating, f.max_rating).map(ShipCriterion::Rating)
}

/// Earliest and latest bound instants: the start of year -4712 and of year
/// 294276, both inside the PostgreSQL `timestamptz` range.
const MIN_BOUND_MILLIS: i64 = -210_863_606_400_000;
const MAX_BOUND_MILLIS: i64 = 9_224_286_393_600_000;

/// Millis outside the storable range clamp to its nearest end.
fn instant_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis.clamp(MIN_BOUND_MILLIS, MAX_BOUND_MILLIS)).unwrap_or_default()
}

impl ShipFilter {
    pub fn to_predicate(&self) -> ShipPredicate {
        RULES
            .iter()
            .filter_map(|rule| rule(self))
            .fold(ShipPredicate::unconstrained(), ShipPredicate::and)
    }
}
