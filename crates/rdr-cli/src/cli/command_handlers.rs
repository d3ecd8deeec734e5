use crate::cli::display::{print_json, render_dashboard_list, render_query_list};
use crate::cli::input::{
    parse_object, parse_object_list, parse_params, parse_position, parse_y_axis,
};
use crate::cli::main_types::{
    AddWidgetArgs, ConfigCommands, CreateQueryArgs, CreateVisualizationArgs, DashboardCommands,
    DataSourceCommands, QueryCommands, QueryResultsArgs, VisualizationCommands,
};
use rdr_core::api::client::RedashClient;
use rdr_core::api::models::{
    AddWidgetParams, CreateQueryParams, QueryResultsParams, VisualizationParams,
};
use rdr_core::core::services::config_service::ConfigService;
use rdr_core::error::{AppError, CliError};
use rdr_core::storage::config::Config;
use rdr_core::storage::credentials::mask_api_key;
use rdr_core::utils::logging::print_verbose;
use rdr_core::utils::poll::PollConfig;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: ConfigCommands,
        config_service: &mut ConfigService,
        config_path: Option<PathBuf>,
        url: Option<String>,
        server_url: String,
        client: Result<RedashClient, AppError>,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Showing configuration");

                println!("Current Configuration:");
                println!("=====================");

                match config_path.map(Ok).unwrap_or_else(Config::config_file_path) {
                    Ok(path) => println!("Config File: {}", path.display()),
                    Err(e) => println!("Config File: unavailable ({})", e),
                }

                let url_source = if url.as_deref().is_some_and(|u| !u.is_empty()) {
                    " (--url)"
                } else if config_service.has_url() {
                    ""
                } else {
                    " (default)"
                };
                println!("URL: {}{}", server_url, url_source);

                match &client {
                    Ok(client) => println!("API Key: ✅ Set ({})", mask_api_key(client.api_key())),
                    Err(_) => println!("API Key: ❌ Not set"),
                }

                Ok(())
            }
            ConfigCommands::Set => {
                let url = url.ok_or_else(|| {
                    AppError::Cli(CliError::InvalidArguments(
                        "No configuration values provided. Use --url <url>".to_string(),
                    ))
                })?;

                print_verbose(verbose, &format!("Setting URL to {}", url));

                config_service.set_url(url.clone())?;
                config_service.save_config(config_path)?;
                println!("✅ Set URL to: {}", url);
                println!("Configuration saved successfully.");
                Ok(())
            }
            ConfigCommands::Validate => {
                print_verbose(verbose, "Validating API key and connection");

                let client = match client {
                    Ok(client) => client,
                    Err(e) => {
                        println!("❌ RDR_API_KEY environment variable is not set.\n");
                        println!("To authenticate, set your Redash user API key:");
                        println!("  export RDR_API_KEY=\"your_api_key\"\n");
                        println!("The key is shown on your Redash profile page.");
                        return Err(e);
                    }
                };

                match client.list_dashboards().await {
                    Ok(dashboards) => {
                        println!("✅ API key validated successfully");
                        println!("\nConnection Status:");
                        println!("=====================");
                        println!("  Server: {}", client.base_url);
                        println!("  API Key: {}", mask_api_key(client.api_key()));
                        println!("  Dashboards visible: {}", dashboards.len());
                        Ok(())
                    }
                    Err(e) => {
                        println!("❌ Failed to validate API key: {}", e);
                        println!("\nPossible causes:");
                        println!("  - API key is invalid");
                        println!("  - Redash server is unreachable");
                        Err(e)
                    }
                }
            }
        }
    }
}

#[derive(Default)]
pub struct DataSourceHandler;

impl DataSourceHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: DataSourceCommands,
        client: RedashClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            DataSourceCommands::Create {
                data_source_type,
                name,
                options,
            } => {
                let options = parse_object("options", &options)?;
                print_verbose(
                    verbose,
                    &format!("Creating {} data source '{}'", data_source_type, name),
                );

                let created = client
                    .create_data_source(&data_source_type, &name, options)
                    .await?;
                print_json(&created)
            }
        }
    }
}

#[derive(Default)]
pub struct QueryHandler;

impl QueryHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: QueryCommands,
        client: RedashClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            QueryCommands::Create(args) => self.handle_create(args, client, verbose).await,
            QueryCommands::Refresh { id } => {
                print_verbose(verbose, &format!("Refreshing query {}", id));
                print_json(&client.refresh_query(id).await?)
            }
            QueryCommands::Run { id } => {
                print_verbose(verbose, &format!("Executing query {}", id));
                print_json(&client.run_query(id).await?)
            }
            QueryCommands::Results(args) => self.handle_results(args, client, verbose).await,
            QueryCommands::Job { id } => {
                print_verbose(verbose, &format!("Reading job {}", id));
                print_json(&client.get_job(&id).await?)
            }
        }
    }

    async fn handle_create(
        &self,
        args: CreateQueryArgs,
        client: RedashClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        let mut params = CreateQueryParams::new(args.data_source_id, args.name, args.query);
        params.description = args.description;
        params.options = parse_object("options", &args.options)?;
        params.with_results = !args.no_results;

        print_verbose(
            verbose,
            &format!(
                "Creating query '{}' on data source {} (execute: {})",
                params.name, params.data_source_id, params.with_results
            ),
        );

        print_json(&client.create_query(params).await?)
    }

    async fn handle_results(
        &self,
        args: QueryResultsArgs,
        client: RedashClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        let mut params = QueryResultsParams::new(args.data_source_id, args.query);
        params.query_id = args.query_id;
        params.max_age = args.max_age;
        params.parameters = parse_params(&args.param);
        params.return_results = args.fetch;

        print_verbose(
            verbose,
            &format!(
                "Executing on data source {} - Params: {:?}, Max age: {}, Fetch: {}, Wait: {}",
                params.data_source_id, args.param, params.max_age, args.fetch, args.wait
            ),
        );

        let result = if args.wait {
            let mut poll = PollConfig::default();
            if let Some(max_attempts) = args.max_attempts {
                poll.max_attempts = max_attempts;
            }
            client.generate_query_results_and_wait(params, &poll).await?
        } else {
            client.generate_query_results(params).await?
        };

        print_json(&result)
    }
}

#[derive(Default)]
pub struct VisualizationHandler;

impl VisualizationHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: VisualizationCommands,
        client: RedashClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            VisualizationCommands::Create(args) => {
                let params = visualization_params(args)?;
                print_verbose(
                    verbose,
                    &format!(
                        "Creating {} visualization '{}' for query {}",
                        params.visualization_type, params.name, params.query_id
                    ),
                );

                print_json(&client.create_visualization(&params).await?)
            }
        }
    }
}

fn visualization_params(args: CreateVisualizationArgs) -> Result<VisualizationParams, AppError> {
    let mut params = VisualizationParams::new(args.query_id, args.visualization_type, args.name);
    params.columns = args
        .columns
        .as_deref()
        .map(|raw| parse_object_list("columns", raw))
        .transpose()?;
    params.x_axis = args.x_axis;
    params.y_axis = args.y_axis.as_deref().map(parse_y_axis).transpose()?;
    params.group_by = args.group_by;
    params.custom_options = parse_object("options", &args.options)?;
    params.description = args.description;
    Ok(params)
}

#[derive(Default)]
pub struct DashboardHandler;

impl DashboardHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: DashboardCommands,
        client: RedashClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            DashboardCommands::Create { name } => {
                print_verbose(verbose, &format!("Creating dashboard '{}'", name));
                print_json(&client.create_dashboard(&name).await?)
            }
            DashboardCommands::List { format } => {
                print_verbose(verbose, "Listing dashboards");
                let dashboards = client.list_dashboards().await?;

                match format.as_str() {
                    "json" => print_json(&dashboards),
                    _ if dashboards.is_empty() => {
                        println!("No dashboards found.");
                        Ok(())
                    }
                    _ => {
                        println!("{}", render_dashboard_list(&dashboards));
                        Ok(())
                    }
                }
            }
            DashboardCommands::Show { slug } => {
                print_verbose(verbose, &format!("Fetching dashboard '{}'", slug));
                // Full server document, not the typed subset used for layout
                let dashboard: Value = client.get(&format!("dashboards/{}", slug)).await?;
                print_json(&dashboard)
            }
            DashboardCommands::AddWidget(args) => {
                let params = widget_params(args)?;
                print_verbose(
                    verbose,
                    &format!(
                        "Adding widget to dashboard {} - Visualization: {:?}, Full width: {}, Position: {:?}",
                        params.dashboard_id, params.visualization_id, params.full_width, params.position
                    ),
                );

                print_json(&client.add_widget(params).await?)
            }
            DashboardCommands::Position { slug, full_width } => {
                let position = client.calculate_widget_position(&slug, full_width).await?;
                print_json(&position)
            }
            DashboardCommands::Publish { id } => {
                print_verbose(verbose, &format!("Publishing dashboard {}", id));

                match client.publish_dashboard(id).await? {
                    Some(url) => println!("✅ Dashboard {} published: {}", id, url),
                    None => println!("✅ Dashboard {} published (no public URL returned)", id),
                }
                Ok(())
            }
            DashboardCommands::Queries { slug, format } => {
                print_verbose(verbose, &format!("Fetching queries of dashboard '{}'", slug));
                let queries = client.get_dashboard_queries(&slug).await?;

                match format.as_str() {
                    "json" => print_json(&queries),
                    _ if queries.is_empty() => {
                        println!("Dashboard '{}' has no visualization widgets.", slug);
                        Ok(())
                    }
                    _ => {
                        println!("{}", render_query_list(&queries));
                        Ok(())
                    }
                }
            }
        }
    }
}

fn widget_params(args: AddWidgetArgs) -> Result<AddWidgetParams, AppError> {
    Ok(AddWidgetParams {
        dashboard_id: args.dashboard_id,
        text: args.text.unwrap_or_default(),
        visualization_id: args.visualization_id,
        full_width: args.full_width,
        position: args.position.as_deref().map(parse_position).transpose()?,
    })
}
