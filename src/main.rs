use std::error::Error;

use colored::Colorize;
use structopt::StructOpt;

use easydataverse::cli::auth::{AuthProfile, AuthSubCommand};
use easydataverse::cli::base::Matcher;
use easydataverse::cli::dataset::DatasetSubCommand;
use easydataverse::cli::file::FileSubCommand;
use easydataverse::client::BaseClient;

static HEADER: &str = r#"
--- easyDataverse Command Line Interface (EDVCLI) ---
"#;

#[derive(StructOpt, Debug)]
struct GlobalOpts {
    /// Profile name to use for configuration
    #[structopt(short, long)]
    profile: Option<String>,
}

#[derive(StructOpt, Debug)]
#[structopt(about = "CLI to build, validate, and upload Dataverse datasets")]
#[allow(clippy::upper_case_acronyms)]
struct CLI {
    #[structopt(flatten)]
    global: GlobalOpts,

    #[structopt(subcommand)]
    cmd: EDVCLI,
}

#[derive(StructOpt, Debug)]
#[allow(clippy::upper_case_acronyms)]
enum EDVCLI {
    Dataset(DatasetSubCommand),
    File(FileSubCommand),
    Auth(AuthSubCommand),
}

fn main() {
    let cli = CLI::from_args();

    // This is a special case for the Auth command, which is used to set the
    // profile and does not require a Dataverse instance.
    if let EDVCLI::Auth(cmd) = cli.cmd {
        let client = BaseClient::new("https://None", None).expect("Failed to create base client");
        cmd.process(&client);
        return;
    }

    let client = match cli.global.profile {
        Some(profile) => setup_client_from_keyring(&profile).expect("Failed to set up client."),
        None => setup_client_from_env().expect("Failed to set up client."),
    };

    if atty::is(atty::Stream::Stdout) {
        println!("{}", HEADER.bold());
    }

    match cli.cmd {
        EDVCLI::Dataset(command) => command.process(&client),
        EDVCLI::File(command) => command.process(&client),
        EDVCLI::Auth(command) => command.process(&client),
    }
}

fn setup_client_from_keyring(name: &str) -> Result<BaseClient, Box<dyn Error>> {
    let auth_profile = AuthProfile::get_from_keyring(name)?;
    let client = BaseClient::new(
        auth_profile.get_url(),
        Some(&auth_profile.get_token().to_string()),
    )?;
    Ok(client)
}

fn setup_client_from_env() -> Result<BaseClient, Box<dyn Error>> {
    let (base_url, api_token) = extract_config_from_env();
    let client = BaseClient::new(&base_url, api_token.as_ref())?;
    Ok(client)
}

// This function extracts the base URL and API token from the environment
// variables DATAVERSE_URL and DATAVERSE_API_TOKEN, respectively.
fn extract_config_from_env() -> (String, Option<String>) {
    let base_url = std::env::var("DATAVERSE_URL").unwrap_or_else(|_| {
        panic!(
            "Please specify a Dataverse instance URL in your environment variables with the key 'DATAVERSE_URL', or use a profile name with the --profile flag."
        );
    });
    let api_token = std::env::var("DATAVERSE_API_TOKEN").ok();

    (base_url, api_token)
}
