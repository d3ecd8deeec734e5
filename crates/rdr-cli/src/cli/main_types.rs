use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rdr-cli")]
#[command(about = "Command line interface tool for building Redash queries and dashboards")]
#[command(version)]
#[command(after_help = "Examples:
  rdr-cli config show                              # Show current configuration
  rdr-cli config validate                          # Validate API key and connection
  rdr-cli query create --data-source-id 1 --name Sales --query 'select 1'
  rdr-cli query results --data-source-id 1 --query 'select 1' --wait
  rdr-cli dashboard list                           # List all dashboards
  rdr-cli dashboard add-widget 3 --visualization-id 12

Environment Variables:
  RDR_API_KEY   Redash user API key (required for authentication)
  RDR_URL       Redash server URL")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Redash API key for authentication
    #[arg(long, global = true, env = "RDR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Redash server URL (overrides the configuration file and RDR_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configuration management (show, set, validate)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Register data sources
    DataSource {
        #[command(subcommand)]
        command: DataSourceCommands,
    },
    /// Create, refresh and execute queries
    Query {
        #[command(subcommand)]
        command: QueryCommands,
    },
    /// Create visualizations for a query
    Visualization {
        #[command(subcommand)]
        command: VisualizationCommands,
    },
    /// Manage dashboards and their widgets
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Save the server URL given with --url to the configuration file
    #[command(after_help = "Examples:
  rdr-cli config set --url http://localhost:5000
  rdr-cli config set --url https://redash.example.com")]
    Set,
    /// Validate API key and test connection to the Redash server
    Validate,
}

#[derive(Subcommand, Debug)]
pub enum DataSourceCommands {
    /// Register a new data source
    #[command(after_help = "Examples:
  rdr-cli data-source create --type pg --name Warehouse \\
      --options '{\"host\": \"db\", \"port\": 5432, \"dbname\": \"analytics\"}'")]
    Create {
        /// Data source type, e.g. pg, mysql, bigquery
        #[arg(long = "type")]
        data_source_type: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Connection options as a JSON object
        #[arg(long, default_value = "{}")]
        options: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Create a query and execute it right away
    Create(CreateQueryArgs),
    /// Ask the server to refresh a saved query
    Refresh {
        /// Query ID
        id: u64,
    },
    /// Execute a saved query
    Run {
        /// Query ID
        id: u64,
    },
    /// Execute query text against a data source
    Results(QueryResultsArgs),
    /// Show the state of an execution job
    Job {
        /// Job ID returned by query execution
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateQueryArgs {
    /// Data source the query runs against
    #[arg(long)]
    pub data_source_id: u64,

    /// Query name
    #[arg(long)]
    pub name: String,

    /// Query text
    #[arg(long)]
    pub query: String,

    /// Query description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Query options as a JSON object
    #[arg(long, default_value = "{}")]
    pub options: String,

    /// Only create the query, do not execute it
    #[arg(long)]
    pub no_results: bool,
}

#[derive(Args, Debug)]
#[command(after_help = "Examples:
  rdr-cli query results --data-source-id 1 --query 'select 1'           # Returns the job
  rdr-cli query results --data-source-id 1 --query 'select 1' --fetch   # Reads the job once
  rdr-cli query results --data-source-id 1 --query 'select 1' --wait    # Polls until done
  rdr-cli query results --data-source-id 1 --query 'select {{ d }}' --param d=2024-01-01")]
pub struct QueryResultsArgs {
    /// Data source the query runs against
    #[arg(long)]
    pub data_source_id: u64,

    /// Query text
    #[arg(long)]
    pub query: String,

    /// Saved query this execution belongs to
    #[arg(long)]
    pub query_id: Option<u64>,

    /// Maximum age in seconds of a cached result to accept
    #[arg(long, default_value = "0")]
    pub max_age: u64,

    /// Query parameters in key=value format (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub param: Vec<String>,

    /// Read the job once and return its result if it is ready
    #[arg(long, conflicts_with = "wait")]
    pub fetch: bool,

    /// Poll the job until it finishes
    #[arg(long)]
    pub wait: bool,

    /// Maximum number of job polls with --wait
    #[arg(long, requires = "wait")]
    pub max_attempts: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum VisualizationCommands {
    /// Create a table, pivot or chart visualization
    Create(CreateVisualizationArgs),
}

#[derive(Args, Debug)]
#[command(after_help = "Examples:
  rdr-cli visualization create --query-id 12 --type line --name Revenue \\
      --x-axis day --y-axis revenue,orders --group-by region
  rdr-cli visualization create --query-id 12 --type table --name Rows \\
      --columns '[{\"name\": \"day\"}, {\"name\": \"revenue\", \"displayAs\": \"number\"}]'
  rdr-cli visualization create --query-id 12 --type bar --name Orders \\
      --x-axis day --y-axis '[{\"name\": \"orders\", \"label\": \"Orders\", \"type\": \"column\"}]'")]
pub struct CreateVisualizationArgs {
    /// Query the visualization renders
    #[arg(long)]
    pub query_id: u64,

    /// Visualization type: table, pivot, or a chart kind such as line, bar, pie
    #[arg(long = "type")]
    pub visualization_type: String,

    /// Visualization name
    #[arg(long)]
    pub name: String,

    /// Table columns as a JSON array of objects
    #[arg(long)]
    pub columns: Option<String>,

    /// Column plotted on the x axis (charts)
    #[arg(long)]
    pub x_axis: Option<String>,

    /// Plotted columns: comma-separated names or a JSON array of objects (charts)
    #[arg(long)]
    pub y_axis: Option<String>,

    /// Column splitting the data into series (charts)
    #[arg(long)]
    pub group_by: Option<String>,

    /// Extra options as a JSON object, applied over the computed ones
    #[arg(long, default_value = "{}")]
    pub options: String,

    /// Visualization description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum DashboardCommands {
    /// Create an empty draft dashboard
    Create {
        /// Dashboard name
        name: String,
    },
    /// List all dashboards
    #[command(after_help = "Examples:
  rdr-cli dashboard list                # Table output
  rdr-cli dashboard list --format json  # Output as JSON")]
    List {
        /// Output format: table or json
        #[arg(short, long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },
    /// Show a dashboard with its widgets
    Show {
        /// Dashboard slug
        slug: String,
    },
    /// Add a visualization or text widget
    AddWidget(AddWidgetArgs),
    /// Show where the next widget would be placed
    Position {
        /// Dashboard slug
        slug: String,
        /// Compute the position of a full-width widget
        #[arg(long)]
        full_width: bool,
    },
    /// Take a dashboard out of draft and share it
    Publish {
        /// Dashboard ID
        id: u64,
    },
    /// List the queries behind a dashboard's widgets
    Queries {
        /// Dashboard slug
        slug: String,
        /// Output format: table or json
        #[arg(short, long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },
}

#[derive(Args, Debug)]
#[command(after_help = "Examples:
  rdr-cli dashboard add-widget 3 --visualization-id 12
  rdr-cli dashboard add-widget 3 --text '## Notes' --full-width
  rdr-cli dashboard add-widget 3 --visualization-id 12 \\
      --position '{\"col\": 0, \"row\": 16, \"sizeX\": 6, \"sizeY\": 8}'")]
pub struct AddWidgetArgs {
    /// Dashboard ID
    pub dashboard_id: u64,

    /// Visualization to place on the dashboard
    #[arg(long, required_unless_present = "text")]
    pub visualization_id: Option<u64>,

    /// Markdown text for a text widget
    #[arg(long)]
    pub text: Option<String>,

    /// Make the widget span the whole dashboard width
    #[arg(long)]
    pub full_width: bool,

    /// Explicit position as a JSON object (col, row, sizeX, sizeY)
    #[arg(long)]
    pub position: Option<String>,
}
