// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed finance records.
//!
//! Records arrive from the API as loosely shaped JSON (`*Wire` structs) and are
//! converted with [`Resource::from_wire`], which names the offending field and
//! record id on failure. User input goes through the `*Draft` constructors,
//! which apply the same rules the entry forms enforce.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{UnknownLabel, ValidationError};
use crate::utils::parse_timestamp;

pub type RecordId = String;

const MIN_PASSWORD_LEN: usize = 6;

/// Largest amount a record may carry (10^15). Totals over any realistic
/// number of such records stay far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Lowercased alphanumerics only, so "Personal Care" == "personal-care".
fn norm(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IncomeSource {
    Salary,
    Freelance,
    #[serde(alias = "Investment")]
    Investments,
    Gift,
    Rental,
    Other,
}

impl IncomeSource {
    pub const ALL: [IncomeSource; 6] = [
        IncomeSource::Salary,
        IncomeSource::Freelance,
        IncomeSource::Investments,
        IncomeSource::Gift,
        IncomeSource::Rental,
        IncomeSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeSource::Salary => "Salary",
            IncomeSource::Freelance => "Freelance",
            IncomeSource::Investments => "Investments",
            IncomeSource::Gift => "Gift",
            IncomeSource::Rental => "Rental",
            IncomeSource::Other => "Other",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            IncomeSource::Investments => &["Investment"],
            _ => &[],
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomeSource {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = norm(s);
        IncomeSource::ALL
            .into_iter()
            .find(|v| {
                norm(v.as_str()) == wanted || v.aliases().iter().any(|a| norm(a) == wanted)
            })
            .ok_or_else(|| UnknownLabel {
                kind: "income source",
                value: s.trim().to_string(),
            })
    }
}

/// Expense and budget category. Alternate spellings used by older clients
/// ("Transportation", "Healthcare", "Others") collapse onto one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    #[serde(alias = "Transportation")]
    Transport,
    Housing,
    Rent,
    Utilities,
    Shopping,
    Entertainment,
    #[serde(alias = "Healthcare")]
    Health,
    Education,
    #[serde(rename = "Personal Care", alias = "PersonalCare")]
    PersonalCare,
    Debt,
    #[serde(alias = "Others")]
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Rent,
        Category::Utilities,
        Category::Shopping,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::PersonalCare,
        Category::Debt,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::PersonalCare => "Personal Care",
            Category::Debt => "Debt",
            Category::Other => "Other",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Category::Transport => &["Transportation"],
            Category::Health => &["Healthcare"],
            Category::Other => &["Others"],
            _ => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = norm(s);
        Category::ALL
            .into_iter()
            .find(|v| {
                norm(v.as_str()) == wanted || v.aliases().iter().any(|a| norm(a) == wanted)
            })
            .ok_or_else(|| UnknownLabel {
                kind: "category",
                value: s.trim().to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: RecordId,
    pub description: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub source: IncomeSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: RecordId,
    pub description: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: RecordId,
    pub category: Category,
    pub amount: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    pub name: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
    pub target_date: DateTime<Utc>,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Wire shapes

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeWire {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseWire {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWire {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalWire {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target_amount: Value,
    #[serde(default)]
    pub saved_amount: Value,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn wire_id(id: Option<String>) -> Result<RecordId, ValidationError> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ValidationError::new("id", "(unknown)", "missing record id")),
    }
}

fn wire_text(v: Option<String>, field: &'static str, id: &str) -> Result<String, ValidationError> {
    match v {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(ValidationError::new(field, id, "missing")),
    }
}

fn wire_amount(v: &Value, field: &'static str, id: &str) -> Result<Decimal, ValidationError> {
    let parsed = match v {
        Value::Number(n) => {
            let text = n.to_string();
            text.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|_| ValidationError::new(field, id, format!("'{}' is not a decimal", text)))?
        }
        Value::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| ValidationError::new(field, id, format!("'{}' is not a number", s)))?,
        Value::Null => return Err(ValidationError::new(field, id, "missing")),
        other => {
            return Err(ValidationError::new(
                field,
                id,
                format!("expected a number, got {}", other),
            ));
        }
    };
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(ValidationError::new(field, id, "must not be negative"));
    }
    if parsed > MAX_AMOUNT {
        return Err(ValidationError::new(field, id, format!("exceeds {}", MAX_AMOUNT)));
    }
    Ok(parsed)
}

fn wire_date(v: Option<String>, field: &'static str, id: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = v.ok_or_else(|| ValidationError::new(field, id, "missing"))?;
    parse_timestamp(&raw)
        .ok_or_else(|| ValidationError::new(field, id, format!("unparseable date '{}'", raw)))
}

fn wire_label<T>(v: Option<String>, field: &'static str, id: &str) -> Result<T, ValidationError>
where
    T: FromStr<Err = UnknownLabel>,
{
    let raw = wire_text(v, field, id)?;
    raw.parse::<T>()
        .map_err(|e| ValidationError::new(field, id, e.to_string()))
}

/// A record type served by the API under its own collection path.
pub trait Resource: Sized + Clone {
    /// Collection path, e.g. `/incomes`.
    const PATH: &'static str;
    /// Singular name used in logs and messages.
    const KIND: &'static str;

    type Wire: DeserializeOwned;
    type Draft: Serialize;

    fn from_wire(wire: Self::Wire) -> Result<Self, ValidationError>;
    fn id(&self) -> &str;
}

impl Resource for Income {
    const PATH: &'static str = "/incomes";
    const KIND: &'static str = "income";
    type Wire = IncomeWire;
    type Draft = IncomeDraft;

    fn from_wire(w: IncomeWire) -> Result<Self, ValidationError> {
        let id = wire_id(w.id)?;
        Ok(Income {
            description: wire_text(w.description, "description", &id)?,
            amount: wire_amount(&w.amount, "amount", &id)?,
            date: wire_date(w.date, "date", &id)?,
            source: wire_label(w.source, "source", &id)?,
            id,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Expense {
    const PATH: &'static str = "/expenses";
    const KIND: &'static str = "expense";
    type Wire = ExpenseWire;
    type Draft = ExpenseDraft;

    fn from_wire(w: ExpenseWire) -> Result<Self, ValidationError> {
        let id = wire_id(w.id)?;
        Ok(Expense {
            description: wire_text(w.description, "description", &id)?,
            amount: wire_amount(&w.amount, "amount", &id)?,
            date: wire_date(w.date, "date", &id)?,
            category: wire_label(w.category, "category", &id)?,
            id,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Budget {
    const PATH: &'static str = "/budgets";
    const KIND: &'static str = "budget";
    type Wire = BudgetWire;
    type Draft = BudgetDraft;

    fn from_wire(w: BudgetWire) -> Result<Self, ValidationError> {
        let id = wire_id(w.id)?;
        Ok(Budget {
            category: wire_label(w.category, "category", &id)?,
            amount: wire_amount(&w.amount, "amount", &id)?,
            start_date: wire_date(w.start_date, "startDate", &id)?,
            end_date: wire_date(w.end_date, "endDate", &id)?,
            id,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Goal {
    const PATH: &'static str = "/goals";
    const KIND: &'static str = "goal";
    type Wire = GoalWire;
    type Draft = GoalDraft;

    fn from_wire(w: GoalWire) -> Result<Self, ValidationError> {
        let id = wire_id(w.id)?;
        let saved_amount = if w.saved_amount.is_null() {
            Decimal::ZERO
        } else {
            wire_amount(&w.saved_amount, "savedAmount", &id)?
        };
        Ok(Goal {
            name: wire_text(w.name, "name", &id)?,
            target_amount: wire_amount(&w.target_amount, "targetAmount", &id)?,
            saved_amount,
            target_date: wire_date(w.target_date, "targetDate", &id)?,
            description: w
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            id,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Drafts: validated user input for create / update requests

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ValidationError::unsaved(field, "is required"));
    }
    Ok(v.to_string())
}

fn positive(value: Decimal, field: &'static str) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::unsaved(field, "must be a positive number"));
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::unsaved(field, format!("must not exceed {}", MAX_AMOUNT)));
    }
    Ok(value)
}

fn email(value: &str) -> Result<String, ValidationError> {
    let v = required(value, "email")?;
    let ok = Regex::new(EMAIL_PATTERN)
        .map(|re| re.is_match(&v))
        .unwrap_or(false);
    if !ok {
        return Err(ValidationError::unsaved("email", format!("'{}' is not an email address", v)));
    }
    Ok(v)
}

fn password(value: &str) -> Result<String, ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::unsaved(
            "password",
            format!("must be at least {} characters long", MIN_PASSWORD_LEN),
        ));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDraft {
    description: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    date: NaiveDate,
    source: IncomeSource,
}

impl IncomeDraft {
    pub fn new(
        description: &str,
        amount: Decimal,
        date: NaiveDate,
        source: IncomeSource,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            description: required(description, "description")?,
            amount: positive(amount, "amount")?,
            date,
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    description: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    date: NaiveDate,
    category: Category,
}

impl ExpenseDraft {
    pub fn new(
        description: &str,
        amount: Decimal,
        date: NaiveDate,
        category: Category,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            description: required(description, "description")?,
            amount: positive(amount, "amount")?,
            date,
            category,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDraft {
    category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl BudgetDraft {
    pub fn new(
        category: Category,
        amount: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if start_date > end_date {
            return Err(ValidationError::unsaved(
                "endDate",
                "end date must not be before the start date",
            ));
        }
        Ok(Self {
            category,
            amount: positive(amount, "amount")?,
            start_date,
            end_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    target_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    saved_amount: Decimal,
    target_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl GoalDraft {
    /// `today` is the caller's current date; the target must lie after it.
    pub fn new(
        name: &str,
        target_amount: Decimal,
        saved_amount: Decimal,
        target_date: NaiveDate,
        description: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let name = required(name, "name")?;
        let target_amount = positive(target_amount, "targetAmount")?;
        if saved_amount < Decimal::ZERO {
            return Err(ValidationError::unsaved("savedAmount", "must not be negative"));
        }
        if saved_amount > target_amount {
            return Err(ValidationError::unsaved(
                "savedAmount",
                "cannot exceed the target amount",
            ));
        }
        if target_date <= today {
            return Err(ValidationError::unsaved(
                "targetDate",
                "must be in the future",
            ));
        }
        Ok(Self {
            name,
            target_amount,
            saved_amount,
            target_date,
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    name: String,
    email: String,
    password: String,
}

impl Registration {
    pub fn new(name: &str, email_addr: &str, pass: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required(name, "name")?,
            email: email(email_addr)?,
            password: password(pass)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email_addr: &str, pass: &str) -> Result<Self, ValidationError> {
        if pass.is_empty() {
            return Err(ValidationError::unsaved("password", "is required"));
        }
        Ok(Self {
            email: required(email_addr, "email")?,
            password: pass.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl ProfileUpdate {
    pub fn new(
        name: Option<&str>,
        email_addr: Option<&str>,
        pass: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if name.is_none() && email_addr.is_none() && pass.is_none() {
            return Err(ValidationError::unsaved("profile", "nothing to update"));
        }
        Ok(Self {
            name: name.map(|n| required(n, "name")).transpose()?,
            email: email_addr.map(email).transpose()?,
            password: pass.map(password).transpose()?,
        })
    }
}
