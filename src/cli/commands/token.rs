use clap::Args;
use serde_json::json;

use crate::auth::generate_jwt;
use crate::cli::{utils, OutputFormat};

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(long, help = "User id to put in the token")]
    pub user_id: i64,

    #[arg(long, help = "Role claim, e.g. Admin or Manager")]
    pub role: Option<String>,

    #[arg(long, help = "Email claim")]
    pub email: Option<String>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let token = generate_jwt(args.user_id, args.role.clone(), args.email.clone())?;

    match output_format {
        OutputFormat::Json => utils::output_success(
            &output_format,
            "Token generated",
            Some(json!({
                "token": token,
                "userId": args.user_id,
                "userRole": args.role,
            })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
