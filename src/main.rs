use dto_framework::tracing::setup_tracing;
use dto_framework::{data, Dto};
use dto_recipe::lifecycle::{boot, destroy, import_people_json};
use dto_recipe::model::Person;
use tracing::{error, info, Instrument};

const PEOPLE: &str = r#"[
    {"name": "Ada", "address": {"street": "12 Analytical Row", "city": {"name": "London", "zipCode": 1815}}},
    {"name": "Grace", "notes": {"notes": ["COBOL", "Harvard Mark I"]}},
    {"name": "Edsger", "address": {"street": "Mathematical Centre", "city": {"name": "Amsterdam", "zipCode": 1930}}}
]"#;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting application");

    let container = boot();
    let resolver = container.clone().into_resolver();

    let span = tracing::info_span!("single_person");
    let person = async {
        Person::with_data(
            data!({
                "name": "Alan",
                "address": {"street": "Hollymeade", "city": {"name": "Wilmslow", "zipCode": 1954}},
                "notes": {"notes": ["On Computable Numbers"]}
            }),
            Some(resolver.clone()),
        )
        .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(person = %person, "Person populated");

    let span = tracing::info_span!("batch_import");
    let import_result = import_people_json(PEOPLE, resolver.clone())
        .instrument(span)
        .await;

    match import_result {
        Ok(people) => {
            for person in &people {
                info!(person = %person, "Imported");
            }
        }
        Err(e) => error!(error = %e, "Import failed"),
    }

    destroy(&container);

    // Interfaces can no longer be resolved once the bindings are gone.
    if let Err(e) = Person::with_data(data!({"notes": {"notes": []}}), Some(resolver)) {
        info!(error = %e, "Rejected after destroy");
    }

    info!("Application completed successfully");
    Ok(())
}
