// SPDX-License-Identifier: Apache-2.0

//! Authentication status.

use commit_connect_core::{AppConfig, Session, facade, resolve_token};
use tracing::debug;

use crate::commands::types::AuthStatusResult;

/// Report which token would be used and, if GitHub accepts it, its owner.
pub async fn run_status(config: &AppConfig, token: Option<&str>) -> AuthStatusResult {
    let Some((token, source)) = resolve_token(token) else {
        return AuthStatusResult {
            authenticated: false,
            method: None,
            username: None,
        };
    };

    let username = match Session::open(token, config) {
        Ok(mut session) => match facade::load_profile(&mut session).await {
            Ok(profile) => Some(profile.login),
            Err(e) => {
                debug!(error = %e, "Token could not be verified");
                None
            }
        },
        Err(e) => {
            debug!(error = %e, "Could not build GitHub client");
            None
        }
    };

    AuthStatusResult {
        authenticated: true,
        method: Some(source),
        username,
    }
}
