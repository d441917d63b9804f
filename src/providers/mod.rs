/*!
 * Provider implementations for chat completion services.
 *
 * The translation core only needs "text in, text out"; everything
 * endpoint-specific lives behind the `Provider` trait. The default
 * implementation is an OpenAI-compatible chat completions client.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all chat completion providers
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract the response text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod chat;
