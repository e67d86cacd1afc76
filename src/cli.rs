use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "identity-service")]
#[command(about = "Student identity service: registration, login and token verification", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Listening port, overrides API_PORT
        #[arg(short, long, env = "API_PORT")]
        port: Option<u16>,
    },
    /// Print the bcrypt hash of a secret, for seeding credential rows
    HashSecret {
        secret: String,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Serve { port: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_serves() {
        let cli = Cli::try_parse_from(["identity-service"]).unwrap();
        assert!(matches!(cli.command(), Commands::Serve { .. }));
    }

    #[test]
    fn test_hash_secret_takes_positional_secret() {
        let cli = Cli::try_parse_from(["identity-service", "hash-secret", "test_password"]).unwrap();
        assert_eq!(
            cli.command(),
            Commands::HashSecret {
                secret: "test_password".to_string()
            }
        );
    }

    #[test]
    fn test_serve_port_flag() {
        let cli = Cli::try_parse_from(["identity-service", "serve", "--port", "9000"]).unwrap();
        assert_eq!(cli.command(), Commands::Serve { port: Some(9000) });
    }
}
