use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the Employee Gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080/api/v1/employee")]
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
    /// Fetch one employee by id
    Get { id: String },
    /// Show the highest salary
    HighestSalary,
    /// Show the top ten earners' names
    TopEarners,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: u32,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        title: String,
    },
    /// Delete an employee by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::List => {
            let res = client.get(&cli.url).send().await?;
            print_response(res).await?;
        }
        Commands::Search { fragment } => {
            let res = client
                .get(format!("{}/search/{}", cli.url, fragment))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Get { id } => {
            let res = client.get(format!("{}/{}", cli.url, id)).send().await?;
            print_response(res).await?;
        }
        Commands::HighestSalary => {
            let res = client
                .get(format!("{}/highestSalary", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::TopEarners => {
            let res = client
                .get(format!("{}/topTenHighestEarningEmployeeNames", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Create {
            name,
            salary,
            age,
            title,
        } => {
            let body = json!({ "name": name, "salary": salary, "age": age, "title": title });
            let res = client.post(&cli.url).json(&body).send().await?;
            print_response(res).await?;
        }
        Commands::Delete { id } => {
            let res = client.delete(format!("{}/{}", cli.url, id)).send().await?;
            let status = res.status();
            let text = res.text().await?;
            if status.is_success() {
                println!("Deleted: {}", text);
            } else {
                eprintln!("Error: gateway returned status {}", status);
                eprintln!("Response: {}", text);
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
