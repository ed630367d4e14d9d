//! Redis cache implementation.
//!
//! Backs the request rate limiter. Optional: the service runs without it.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

use crate::config::CACHE_PREFIX_RATE_LIMIT;
use crate::errors::AppResult;

/// Redis cache wrapper with a multiplexed, auto-reconnecting connection.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    /// Count a request against a fixed window.
    /// Returns (current_count, is_allowed) tuple.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = rate_limit_key(identifier);
        let mut conn = self.connection.clone();

        let (count,): (i64,) = rate_limit_pipeline(&key, window_seconds)
            .query_async(&mut conn)
            .await?;

        let count = count.max(0) as u64;
        Ok((count, count <= max_requests))
    }
}

/// Open the window (key with TTL) if absent, then count the request.
/// Sent as one MULTI/EXEC so a counter never exists without its expiry.
fn rate_limit_pipeline(key: &str, window_seconds: u64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET")
        .arg(key)
        .arg(0)
        .arg("EX")
        .arg(window_seconds)
        .arg("NX")
        .ignore()
        .incr(key, 1);
    pipe
}

fn rate_limit_key(identifier: &str) -> String {
    format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_key_prefixed() {
        assert_eq!(rate_limit_key("general:10.0.0.1"), "rate_limit:general:10.0.0.1");
    }

    #[test]
    fn test_rate_limit_window_and_count_sent_together() {
        let packed = rate_limit_pipeline("rate_limit:c", 60).get_packed_pipeline();
        let text = String::from_utf8_lossy(&packed);

        let multi = text.find("MULTI").unwrap();
        let set = text.find("SET").unwrap();
        let incr = text.find("INCR").unwrap();
        let exec = text.find("EXEC").unwrap();
        assert!(multi < set && set < incr && incr < exec);
        assert!(text.contains("NX"));
        assert!(text.contains("EX\r\n$2\r\n60"));
    }
}
