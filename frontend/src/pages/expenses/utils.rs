use crate::api::{ApiError, Expense, ExpensePayload, ExpenseQuery, ExpenseStatus};
use crate::utils::time::parse_date_input;
use leptos::*;
use serde_json::{Map, Value};

pub const PAGE_SIZE: u32 = 20;
pub const DEFAULT_CURRENCY: &str = "EUR";

#[derive(Clone, Copy)]
pub struct ExpenseFormState {
    pub payment_id: RwSignal<String>,
    pub transaction_date: RwSignal<String>,
    pub vendor_id: RwSignal<String>,
    pub category: RwSignal<String>,
    pub amount: RwSignal<String>,
    pub currency: RwSignal<String>,
    pub vat_rate: RwSignal<String>,
    pub vat_amount: RwSignal<String>,
    pub description: RwSignal<String>,
    pub file_id: RwSignal<Option<String>>,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self {
            payment_id: create_rw_signal(String::new()),
            transaction_date: create_rw_signal(String::new()),
            vendor_id: create_rw_signal(String::new()),
            category: create_rw_signal(String::new()),
            amount: create_rw_signal(String::new()),
            currency: create_rw_signal(DEFAULT_CURRENCY.to_string()),
            vat_rate: create_rw_signal(String::new()),
            vat_amount: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            file_id: create_rw_signal(None),
        }
    }
}

fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn number_text(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

fn parse_optional_number(raw: &str) -> Result<Option<f64>, ()> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or(())
}

/// VAT contained in a gross `amount` at `rate` percent, rounded to cents.
pub fn vat_from_rate(amount: f64, rate: f64) -> f64 {
    let vat = amount * rate / (100.0 + rate);
    (vat * 100.0).round() / 100.0
}

pub fn is_currency_code(value: &str) -> bool {
    value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic())
}

impl ExpenseFormState {
    pub fn load(&self, expense: &Expense) {
        self.payment_id
            .set(expense.payment_id.clone().unwrap_or_default());
        self.transaction_date
            .set(expense.transaction_date.format("%Y-%m-%d").to_string());
        self.vendor_id.set(expense.vendor_id.clone());
        self.category.set(expense.category.clone());
        self.amount.set(format!("{:.2}", expense.amount));
        self.currency.set(expense.currency.clone());
        self.vat_rate.set(number_text(expense.vat_rate));
        self.vat_amount.set(number_text(expense.vat_amount));
        self.description
            .set(expense.description.clone().unwrap_or_default());
        self.file_id.set(expense.file_id.clone());
    }

    pub fn reset(&self) {
        self.payment_id.set(String::new());
        self.transaction_date.set(String::new());
        self.vendor_id.set(String::new());
        self.category.set(String::new());
        self.amount.set(String::new());
        self.currency.set(DEFAULT_CURRENCY.to_string());
        self.vat_rate.set(String::new());
        self.vat_amount.set(String::new());
        self.description.set(String::new());
        self.file_id.set(None);
    }

    /// Fills the VAT amount from the entered gross amount and rate.
    pub fn fill_vat_amount(&self) {
        let amount = parse_optional_number(&self.amount.get_untracked());
        let rate = parse_optional_number(&self.vat_rate.get_untracked());
        if let (Ok(Some(amount)), Ok(Some(rate))) = (amount, rate) {
            self.vat_amount.set(format!("{:.2}", vat_from_rate(amount, rate)));
        }
    }

    pub fn to_payload(&self) -> Result<ExpensePayload, ApiError> {
        let mut fields = Map::new();
        let mut reject = |field: &str, message: &str| {
            fields.insert(field.to_string(), Value::String(message.to_string()));
        };

        let transaction_date = match parse_date_input(&self.transaction_date.get_untracked()) {
            Ok(Some(date)) => Some(date),
            Ok(None) => {
                reject("transactionDate", "Transaction date is required.");
                None
            }
            Err(_) => {
                reject("transactionDate", "Use the YYYY-MM-DD format.");
                None
            }
        };

        let vendor_id = self.vendor_id.get_untracked().trim().to_string();
        if vendor_id.is_empty() {
            reject("vendorId", "Choose a vendor.");
        }
        let category = self.category.get_untracked().trim().to_string();
        if category.is_empty() {
            reject("category", "Choose a category.");
        }

        let amount = match parse_optional_number(&self.amount.get_untracked()) {
            Ok(Some(value)) if value > 0.0 => Some(value),
            Ok(Some(_)) => {
                reject("amount", "Amount must be greater than zero.");
                None
            }
            Ok(None) => {
                reject("amount", "Amount is required.");
                None
            }
            Err(_) => {
                reject("amount", "Amount must be a number.");
                None
            }
        };

        let currency = self.currency.get_untracked().trim().to_uppercase();
        if !is_currency_code(&currency) {
            reject("currency", "Use a three-letter currency code.");
        }

        let vat_rate = match parse_optional_number(&self.vat_rate.get_untracked()) {
            Ok(Some(rate)) if !(0.0..=100.0).contains(&rate) => {
                reject("vatRate", "VAT rate must be between 0 and 100.");
                None
            }
            Ok(rate) => rate,
            Err(_) => {
                reject("vatRate", "VAT rate must be a number.");
                None
            }
        };

        let vat_amount = match parse_optional_number(&self.vat_amount.get_untracked()) {
            Ok(Some(vat)) if vat < 0.0 => {
                reject("vatAmount", "VAT amount cannot be negative.");
                None
            }
            Ok(Some(vat)) if amount.map(|a| vat > a).unwrap_or(false) => {
                reject("vatAmount", "VAT amount cannot exceed the amount.");
                None
            }
            Ok(vat) => vat,
            Err(_) => {
                reject("vatAmount", "VAT amount must be a number.");
                None
            }
        };

        match (transaction_date, amount) {
            (Some(transaction_date), Some(amount)) if fields.is_empty() => Ok(ExpensePayload {
                payment_id: optional_text(self.payment_id.get_untracked()),
                transaction_date,
                vendor_id,
                category,
                amount,
                currency,
                vat_rate,
                vat_amount,
                description: optional_text(self.description.get_untracked()),
                file_id: self.file_id.get_untracked(),
            }),
            _ => Err(ApiError::validation("Please check the highlighted fields.")
                .with_details(serde_json::json!({ "fields": fields }))),
        }
    }
}

#[derive(Clone, Copy)]
pub struct ExpenseFilterState {
    pub status: RwSignal<String>,
    pub category: RwSignal<String>,
    pub vendor_id: RwSignal<String>,
    pub from: RwSignal<String>,
    pub to: RwSignal<String>,
    pub search: RwSignal<String>,
    pub page: RwSignal<u32>,
}

impl Default for ExpenseFilterState {
    fn default() -> Self {
        Self {
            status: create_rw_signal(String::new()),
            category: create_rw_signal(String::new()),
            vendor_id: create_rw_signal(String::new()),
            from: create_rw_signal(String::new()),
            to: create_rw_signal(String::new()),
            search: create_rw_signal(String::new()),
            page: create_rw_signal(1),
        }
    }
}

impl ExpenseFilterState {
    /// Tracks every filter signal; invalid dates are ignored rather than
    /// blocking the list.
    pub fn query(&self) -> ExpenseQuery {
        ExpenseQuery {
            status: ExpenseStatus::parse(&self.status.get()),
            category: optional_text(self.category.get()),
            vendor_id: optional_text(self.vendor_id.get()),
            from: parse_date_input(&self.from.get()).ok().flatten(),
            to: parse_date_input(&self.to.get()).ok().flatten(),
            search: optional_text(self.search.get()),
            page: self.page.get().max(1),
            page_size: PAGE_SIZE,
        }
    }

    /// Changing any filter starts again from the first page.
    pub fn set_filter(&self, signal: RwSignal<String>, value: String) {
        signal.set(value);
        self.page.set(1);
    }

    pub fn clear(&self) {
        for signal in [
            self.status,
            self.category,
            self.vendor_id,
            self.from,
            self.to,
            self.search,
        ] {
            signal.set(String::new());
        }
        self.page.set(1);
    }
}
