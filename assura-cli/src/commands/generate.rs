use assura_types::customer::{CustomerForm, CustomerRecord};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::format::{style_bold, style_dim};

use super::{alerts_json, build_app, outcome, print_json};

/// Build the record the way the form does; `insurance_type` replaces the policy number when given alone.
pub(crate) fn record_from_args(
    name: String,
    age: String,
    policy_number: Option<String>,
    insurance_type: Option<String>,
) -> CustomerRecord {
    let mut record = CustomerRecord::from_form(&CustomerForm {
        name,
        age,
        policy_number: policy_number.clone().unwrap_or_default(),
    });
    if policy_number.is_none() && insurance_type.is_some() {
        record.policy_number = None;
    }
    record.insurance_type = insurance_type;
    record
}

pub async fn run(
    config: &AppConfig,
    name: String,
    age: String,
    policy_number: Option<String>,
    insurance_type: Option<String>,
    json: bool,
) -> Result<(), AppError> {
    let (app, alerts) = build_app(config, json)?;
    let record = record_from_args(name, age, policy_number, insurance_type);

    let ok = app.submit_customer_form(record.clone()).await;

    if json {
        print_json(&serde_json::json!({
            "recorded": ok,
            "mode": app.mode().to_string(),
            "customer_data": record,
            "contract": app.display(),
            "alerts": alerts_json(&alerts),
        }))?;
        return outcome(ok, "contract generation");
    }

    if ok {
        let display = app.display();
        if !display.is_empty() {
            println!();
            println!("  {}", style_bold().apply_to("Insurance Contract"));
            for line in display.lines() {
                println!("  {}", line);
            }
        } else {
            println!("  {}", style_dim().apply_to("(no document text in mock mode)"));
        }
        println!();
    }
    outcome(ok, "contract generation")
}
