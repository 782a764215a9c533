use clap::{Parser, Subcommand};

/// HRIS Gateway: employee, team and policy data behind one token-managed proxy
#[derive(Parser)]
#[command(name = "hris-gateway", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway server
    Serve {
        /// Port to bind (overrides HRIS_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the tool catalog
    Tools {
        /// Emit OpenAI function-calling definitions instead of MCP tool definitions
        #[arg(long)]
        openai: bool,
    },

    /// Call one tool and print its result
    Call {
        /// Tool name, e.g. get_employee_profile
        name: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}
