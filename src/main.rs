use clap::Parser;
use places_actions::core::actions::{
    Action, BeginningSearchAction, PlacesSearchAction, ValidateSlotsAction,
};
use places_actions::domain::model::{slots, SlotValue};
use places_actions::domain::ports::PlacesConfig;
use places_actions::utils::{logger, validation::Validate};
use places_actions::{
    ActionError, CliConfig, CollectingDispatcher, InMemoryTracker, NominatimGeocoder,
    PlacesSearchClient, SlotValidator, TomlConfig, Utterance,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting places-actions CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {}", serde_json::to_string_pretty(&cli)?);
    }

    let result = match cli.config.clone() {
        Some(path) => match load_toml_config(&path) {
            Ok(config) => run(&cli, config).await,
            Err(e) => Err(e),
        },
        None => match cli.validate() {
            Ok(()) => run(&cli, cli.clone()).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        tracing::error!("❌ Search run failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn load_toml_config(path: &str) -> Result<TomlConfig, ActionError> {
    let config = TomlConfig::from_file(path)?;
    config.validate()?;
    Ok(config)
}

async fn run<C: PlacesConfig>(cli: &CliConfig, config: C) -> Result<(), ActionError> {
    let geocoder = NominatimGeocoder::new(
        config.geocoder_endpoint(),
        config.geocoder_user_agent(),
        config.reverse_min_interval(),
    )?;

    // 填入使用者提供的槽位
    let mut tracker = InMemoryTracker::new();
    tracker.set(slots::ADDRESS, SlotValue::Tokens(cli.address.clone()));
    tracker.set(slots::RADIUS, SlotValue::text(cli.radius.clone()));
    tracker.set(slots::PLACE_TYPE, SlotValue::text(cli.place_type.clone()));

    let mut dispatcher = CollectingDispatcher::new();

    // 驗證 address / radius，並套用槽位更新
    let validate = ValidateSlotsAction::new(SlotValidator::new(geocoder.clone()));
    let updates = validate.run(&mut dispatcher, &tracker).await?;
    tracker.apply(updates);

    if !tracker.has_slot(slots::ADDRESS) || !tracker.has_slot(slots::RADIUS) {
        tracing::info!("Validation rejected the input, not searching");
        print_utterances(dispatcher.drain());
        return Ok(());
    }

    // 搜尋並輸出回覆
    BeginningSearchAction.run(&mut dispatcher, &tracker).await?;
    let search = PlacesSearchAction::new(PlacesSearchClient::new(geocoder, config));
    search.run(&mut dispatcher, &tracker).await?;

    print_utterances(dispatcher.drain());
    Ok(())
}

fn print_utterances(utterances: Vec<Utterance>) {
    for utterance in utterances {
        match utterance {
            Utterance::Text(text) => println!("{}", text),
            // Template rendering belongs to the dialogue manager; the CLI
            // just shows the template id.
            Utterance::Template(template) => println!("[{}]", template),
        }
    }
}
