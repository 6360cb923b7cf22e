use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use url::Url;

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command-line client for the employee gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all employees
    List,
    /// Search employees by name fragment
    Search { fragment: String },
    /// Show a single employee
    Get { id: u64 },
    /// Show the highest salary
    Highest,
    /// List the ten highest earners
    TopTen,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: u64,
        #[arg(long)]
        age: u32,
    },
    /// Delete an employee
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let request = match cli.command {
        Commands::List => client.get(endpoint(&base, &[])?),
        Commands::Search { fragment } => client.get(endpoint(&base, &["search", &fragment])?),
        Commands::Get { id } => client.get(endpoint(&base, &[&id.to_string()])?),
        Commands::Highest => client.get(endpoint(&base, &["highestSalary"])?),
        Commands::TopTen => client.get(endpoint(&base, &["topTenHighestEarningEmployeeNames"])?),
        Commands::Create { name, salary, age } => client
            .post(endpoint(&base, &[])?)
            .json(&json!({ "name": name, "salary": salary, "age": age })),
        Commands::Delete { id } => client.delete(endpoint(&base, &[&id.to_string()])?),
    };

    print_response(request.send().await?).await
}

/// Append percent-encoded path segments to the gateway URL.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("'{}' cannot be used as a base URL", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Some(source) = res.headers().get("x-employee-source") {
        if source == "fallback" {
            eprintln!("Note: gateway served fallback data (upstream unavailable)");
        }
    }

    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
