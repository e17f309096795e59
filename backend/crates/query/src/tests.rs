//! Unit tests for the query cache
//! Timing-dependent cases run on a paused tokio clock.

#[cfg(test)]
mod client_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use futures::future::{BoxFuture, FutureExt, join_all};
    use platform::retry::RetryPolicy;

    use crate::{CacheState, Namespace, QueryClient, QueryError, QueryKey, QueryOptions, QueryResult};

    type Loader<T> = Box<dyn Fn() -> BoxFuture<'static, QueryResult<T>> + Send + Sync>;

    fn options(stale_secs: u64, expire_secs: u64) -> QueryOptions {
        QueryOptions::new(
            Duration::from_secs(stale_secs),
            Duration::from_secs(expire_secs),
        )
        .with_retry(RetryPolicy::none())
    }

    /// Returns the call number (1, 2, ...) after `delay`
    fn counting_loader(calls: &Arc<AtomicU32>, delay: Duration) -> Loader<u32> {
        let calls = calls.clone();
        Box::new(move || {
            let calls = calls.clone();
            async move {
                tokio::time::sleep(delay).await;
                Ok(calls.fetch_add(1, Ordering::SeqCst) + 1)
            }
            .boxed()
        })
    }

    fn failing_loader(calls: &Arc<AtomicU32>, error: QueryError) -> Loader<u32> {
        let calls = calls.clone();
        Box::new(move || {
            let calls = calls.clone();
            let error = error.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(error)
            }
            .boxed()
        })
    }

    /// Let spawned fetches run to completion
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    fn wallets_key() -> QueryKey {
        QueryKey::new("wallets").child("list").param("page", 1)
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_fetches_share_one_load() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(30, 300);

        let fetches = (0..5).map(|_| {
            client.fetch(
                &key,
                counting_loader(&calls, Duration::from_millis(100)),
                &opts,
            )
        });
        let results = join_all(fetches).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for result in results {
            assert_eq!(result.unwrap(), 1);
        }
        assert_eq!(client.state(&key), Some(CacheState::Fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_value_skips_loader() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(30, 300);

        client
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(10)).await;
        let value = client
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_value_is_served_and_refreshed_once() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(10, 60);

        client
            .fetch(&key, counting_loader(&calls, Duration::from_millis(50)), &opts)
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(11)).await;

        let first = client
            .fetch(&key, counting_loader(&calls, Duration::from_millis(50)), &opts)
            .await
            .unwrap();
        let second = client
            .fetch(&key, counting_loader(&calls, Duration::from_millis(50)), &opts)
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert_eq!(client.state(&key), Some(CacheState::Stale));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let refreshed = client
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();
        assert_eq!(refreshed, 2);
        assert_eq!(client.state(&key), Some(CacheState::Fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_value_waits_for_new_fetch() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(10, 60);

        client
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(client.state(&key), Some(CacheState::Expired));

        let value = client
            .fetch(&key, counting_loader(&calls, Duration::from_millis(20)), &opts)
            .await
            .unwrap();
        assert_eq!(value, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_value_is_not_served_on_failure() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(10, 60);

        client
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;

        let error = client
            .fetch(
                &key,
                failing_loader(&calls, QueryError::Transport("down".into())),
                &opts,
            )
            .await
            .unwrap_err();

        assert_eq!(error, QueryError::Transport("down".into()));
        assert_eq!(client.state(&key), Some(CacheState::Error));
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_failure_keeps_stale_value() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(10, 60);

        client
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(11)).await;

        let value = client
            .fetch(
                &key,
                failing_loader(
                    &calls,
                    QueryError::Api {
                        status: 500,
                        message: "boom".into(),
                    },
                ),
                &opts,
            )
            .await
            .unwrap();
        settle().await;

        assert_eq!(value, 1);
        assert_eq!(client.state(&key), Some(CacheState::Stale));
        assert!(matches!(
            client.last_error(&key),
            Some(QueryError::Api { status: 500, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_failure_propagates() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = QueryKey::new("analytics").param("period", "7d");

        let error = client
            .fetch(
                &key,
                failing_loader(&calls, QueryError::MissingToken),
                &options(30, 300),
            )
            .await
            .unwrap_err();

        assert_eq!(error, QueryError::MissingToken);
        assert_eq!(client.state(&key), Some(CacheState::Error));
        assert_eq!(client.last_error(&key), Some(QueryError::MissingToken));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_entry_is_refetched() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(30, 300);

        let _ = client
            .fetch(
                &key,
                failing_loader(&calls, QueryError::Transport("down".into())),
                &opts,
            )
            .await;
        let value = client
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();

        assert_eq!(value, 2);
        assert_eq!(client.last_error(&key), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_retried() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(30, 300).with_retry(RetryPolicy::default());

        let loader = {
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if attempt < 3 {
                        Err(QueryError::Transport("reset".into()))
                    } else {
                        Ok(attempt)
                    }
                }
            }
        };

        let value = client.fetch(&key, loader, &opts).await.unwrap();

        assert_eq!(value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auth_failures_are_not_retried() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let opts = options(30, 300).with_retry(RetryPolicy::default());

        let result = client
            .fetch(
                &wallets_key(),
                failing_loader(&calls, QueryError::Unauthorized("expired".into())),
                &opts,
            )
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_namespace_evicts_matching_keys_only() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let opts = options(30, 300);
        let list = wallets_key();
        let summary = QueryKey::new("wallets").child("summary");
        let analytics = QueryKey::new("analytics").param("period", "30d");

        for key in [&list, &summary, &analytics] {
            client
                .fetch(key, counting_loader(&calls, Duration::ZERO), &opts)
                .await
                .unwrap();
        }
        assert_eq!(client.len(), 3);

        let evicted = client.invalidate(&Namespace::new("wallets"));

        assert_eq!(evicted, 2);
        assert_eq!(client.state(&list), None);
        assert_eq!(client.state(&summary), None);
        assert_eq!(client.state(&analytics), Some(CacheState::Fresh));

        let value = client
            .fetch(&list, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();
        assert_eq!(value, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_all_empties_cache() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let opts = options(30, 300);

        client
            .fetch(&wallets_key(), counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();
        client
            .fetch(
                &QueryKey::new("evacuation").child("history"),
                counting_loader(&calls, Duration::ZERO),
                &opts,
            )
            .await
            .unwrap();

        assert_eq!(client.invalidate_all(), 2);
        assert!(client.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidated_in_flight_result_is_discarded() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(30, 300);

        let pending = {
            let client = client.clone();
            let key = key.clone();
            let loader = counting_loader(&calls, Duration::from_millis(100));
            let opts = opts.clone();
            tokio::spawn(async move { client.fetch(&key, loader, &opts).await })
        };
        settle().await;
        assert_eq!(client.state(&key), Some(CacheState::Fetching));

        client.invalidate_all();
        let value = pending.await.unwrap().unwrap();

        assert_eq!(value, 1);
        assert_eq!(client.state(&key), None);
        assert!(client.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_mismatch_is_reported() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(30, 300);

        client
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();

        let result: QueryResult<String> = client
            .fetch(&key, || async { Ok(String::from("wallets")) }, &opts)
            .await;

        assert_eq!(result, Err(QueryError::TypeMismatch(key.to_string())));
    }

    #[tokio::test]
    async fn test_clones_share_one_cache() {
        let client = QueryClient::new();
        let other = client.clone();
        let calls = Arc::new(AtomicU32::new(0));
        let key = wallets_key();
        let opts = options(30, 300);

        client
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();
        let value = other
            .fetch(&key, counting_loader(&calls, Duration::ZERO), &opts)
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
