use crate::cli::command_handlers::{
    ConfigHandler, DashboardHandler, DataSourceHandler, QueryHandler, VisualizationHandler,
};
use crate::cli::main_types::Commands;
use rdr_core::api::client::RedashClient;
use rdr_core::core::services::config_service::ConfigService;
use rdr_core::error::{AppError, CliError};
use rdr_core::storage::config::Config;
use rdr_core::storage::credentials::get_api_key;
use rdr_core::utils::logging::print_verbose;
use rdr_core::utils::validation::validate_api_key;
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    verbose: bool,
    api_key: Option<String>,
    url: Option<String>,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        verbose: bool,
        api_key: Option<String>,
        url: Option<String>,
    ) -> Self {
        Self {
            config,
            config_path,
            verbose,
            api_key,
            url,
        }
    }

    // Get effective API key (CLI arg > env var)
    fn get_effective_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key
            && !key.is_empty()
        {
            return Some(key.clone());
        }
        get_api_key()
    }

    // URL priority: --url > config file > RDR_URL; None means the client default
    fn get_url(&self) -> Option<String> {
        self.url
            .clone()
            .filter(|url| !url.is_empty())
            .or_else(|| self.config.get_url())
    }

    // URL the client talks to, for display
    fn server_url(&self) -> String {
        match &self.url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => self.config.effective_url(),
        }
    }

    fn create_client(&self) -> Result<RedashClient, AppError> {
        let api_key = self.get_effective_api_key().ok_or_else(|| {
            AppError::Cli(CliError::AuthRequired {
                message: "RDR_API_KEY is not set".to_string(),
                hint: "Set the RDR_API_KEY environment variable or pass --api-key".to_string(),
            })
        })?;
        validate_api_key(&api_key)?;

        let client = RedashClient::new(api_key, self.get_url())?;
        self.log_verbose(&format!("Using Redash server at {}", client.base_url));
        Ok(client)
    }

    fn create_config_service(&self) -> ConfigService {
        ConfigService::new(self.config.clone())
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Config { command } => {
                let handler = ConfigHandler::new();
                let mut config_service = self.create_config_service();
                // Config commands must work before an API key is available
                let client = self.create_client();
                handler
                    .handle(
                        command,
                        &mut config_service,
                        self.config_path.clone(),
                        self.url.clone(),
                        self.server_url(),
                        client,
                        self.verbose,
                    )
                    .await
            }
            Commands::DataSource { command } => {
                let handler = DataSourceHandler::new();
                let client = self.create_client()?;
                handler.handle(command, client, self.verbose).await
            }
            Commands::Query { command } => {
                let handler = QueryHandler::new();
                let client = self.create_client()?;
                handler.handle(command, client, self.verbose).await
            }
            Commands::Visualization { command } => {
                let handler = VisualizationHandler::new();
                let client = self.create_client()?;
                handler.handle(command, client, self.verbose).await
            }
            Commands::Dashboard { command } => {
                let handler = DashboardHandler::new();
                let client = self.create_client()?;
                handler.handle(command, client, self.verbose).await
            }
        }
    }
}
