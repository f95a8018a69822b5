//! Blocking management client implementation.

use crate::error::RpcError;
use crate::wire::{AclResponse, ChannelState, Registration, ServerInfo, VersionInfo};
use murmur_domain::{
    AclSnapshot, Channel, ChannelId, MetaServer, ServerId, ServerStatus, UserId, UserRecord,
    VirtualServer,
};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

/// Header carrying the shared management secret
pub const SECRET_HEADER: &str = "x-murmur-secret";

/// Connection settings for [`MetaClient::connect`]
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Shared secret, if the bridge requires one
    pub secret: Option<String>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            secret: None,
        }
    }
}

/// HTTP plumbing shared by the meta and per-server handles
#[derive(Debug, Clone)]
struct Transport {
    http: Client,
    base: String,
}

impl Transport {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RpcError> {
        let response = self.http.get(self.url(path)).send()?;
        Ok(check(response, path)?.json()?)
    }

    fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, RpcError> {
        let response = self.http.get(self.url(path)).query(query).send()?;
        Ok(check(response, path)?.json()?)
    }

    fn delete(&self, path: &str) -> Result<(), RpcError> {
        let response = self.http.delete(self.url(path)).send()?;
        check(response, path)?;
        Ok(())
    }

    fn put<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<(), RpcError> {
        let response = self.http.put(self.url(path)).json(body).send()?;
        check(response, path)?;
        Ok(())
    }
}

/// Map non-success responses to errors
fn check(response: Response, path: &str) -> Result<Response, RpcError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
    if status == StatusCode::NOT_FOUND {
        return Err(RpcError::NotFound(format!("{}: {}", path, message)));
    }
    Err(RpcError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Connected management handle
///
/// Obtained with [`MetaClient::connect`], which fails unless the endpoint
/// answers as a management bridge.
#[derive(Debug, Clone)]
pub struct MetaClient {
    transport: Transport,
    version: String,
}

impl MetaClient {
    /// Connect to the management bridge at `endpoint` and validate the handle
    pub fn connect(endpoint: &str, options: ConnectOptions) -> Result<Self, RpcError> {
        let url = reqwest::Url::parse(endpoint)
            .map_err(|e| RpcError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RpcError::InvalidEndpoint(format!(
                "{}: unsupported scheme {}",
                endpoint,
                url.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(secret) = &options.secret {
            let value = HeaderValue::from_str(secret)
                .map_err(|e| RpcError::InvalidSecret(e.to_string()))?;
            headers.insert(SECRET_HEADER, value);
        }

        let http = Client::builder()
            .timeout(options.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| RpcError::Connection(format!("Failed to build client: {}", e)))?;

        let transport = Transport {
            http,
            base: endpoint.trim_end_matches('/').to_string(),
        };

        let version: VersionInfo = transport.get("/meta/version").map_err(|e| {
            RpcError::Connection(format!("{} is not a valid management endpoint: {}", endpoint, e))
        })?;
        let version = format!(
            "{}.{}.{} {}",
            version.major, version.minor, version.patch, version.release
        )
        .trim_end()
        .to_string();
        tracing::debug!(endpoint, version = %version, "Connected to management bridge");

        Ok(Self { transport, version })
    }

    /// Version reported by the bridge at connect time
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl MetaServer for MetaClient {
    type Server = ServerClient;
    type Error = RpcError;

    fn servers(&self) -> Result<Vec<ServerClient>, RpcError> {
        let ids: Vec<ServerId> = self.transport.get("/servers")?;
        Ok(ids
            .into_iter()
            .map(|id| ServerClient {
                transport: self.transport.clone(),
                id,
            })
            .collect())
    }

    fn check(&self) -> Result<(), RpcError> {
        self.transport.get::<VersionInfo>("/meta/version").map(|_| ())
    }
}

/// Handle to one server instance
#[derive(Debug, Clone)]
pub struct ServerClient {
    transport: Transport,
    id: ServerId,
}

impl ServerClient {
    fn path(&self, rest: &str) -> String {
        format!("/servers/{}{}", self.id, rest)
    }
}

impl VirtualServer for ServerClient {
    type Error = RpcError;

    fn id(&self) -> ServerId {
        self.id
    }

    fn status(&self) -> Result<ServerStatus, RpcError> {
        let info: ServerInfo = self.transport.get(&self.path(""))?;
        Ok(info.into())
    }

    fn registered_user_ids(&self, filter: &str) -> Result<Vec<UserId>, RpcError> {
        self.transport
            .get_with_query(&self.path("/registrations"), &[("filter", filter)])
    }

    fn registration(&self, user_id: UserId) -> Result<UserRecord, RpcError> {
        let registration: Registration = self
            .transport
            .get(&self.path(&format!("/registrations/{}", user_id)))?;
        Ok(registration.into_record(user_id))
    }

    fn unregister_user(&mut self, user_id: UserId) -> Result<(), RpcError> {
        self.transport
            .delete(&self.path(&format!("/registrations/{}", user_id)))
    }

    fn channels(&self) -> Result<BTreeMap<ChannelId, Channel>, RpcError> {
        let states: BTreeMap<ChannelId, ChannelState> = self.transport.get(&self.path("/channels"))?;
        Ok(states
            .into_iter()
            .map(|(id, state)| (id, state.into()))
            .collect())
    }

    fn channel_acl(&self, channel_id: ChannelId) -> Result<AclSnapshot, RpcError> {
        let acl: AclResponse = self
            .transport
            .get(&self.path(&format!("/channels/{}/acl", channel_id)))?;
        Ok(acl.into())
    }

    fn remove_channel(&mut self, channel_id: ChannelId) -> Result<(), RpcError> {
        self.transport
            .delete(&self.path(&format!("/channels/{}", channel_id)))
    }

    fn set_channel_state(&mut self, channel: &Channel) -> Result<(), RpcError> {
        self.transport.put(
            &self.path(&format!("/channels/{}", channel.id)),
            &ChannelState::from(channel),
        )
    }
}
