//! Batch orchestration: fan out one resolver task per credential record,
//! fan in results in input order.
//!
//! Isolation is structural: the resolver never returns an error, each task
//! runs under its own timeout, and a panicked task is converted to a
//! `Failed` row at the join point. No account can abort or reorder its
//! siblings.

use std::sync::Arc;
use std::time::Duration;

use crate::claim::ClaimResult;
use crate::client::RewardClient;
use crate::credential::CredentialRecord;
use crate::diag::DiagnosticSink;
use crate::resolver::resolve;

/// Orchestrator knobs.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Upper bound on one account's claim + metadata calls combined.
    pub per_account_timeout: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            per_account_timeout: Duration::from_secs(60),
        }
    }
}

/// Claim for every record concurrently; results come back in input order.
///
/// All tasks launch before any join, so the batch overlaps every account's
/// network waits. Joining in submission order makes the output order equal
/// the (label-sorted) input order regardless of completion order.
pub async fn claim_all(
    client: Arc<dyn RewardClient>,
    creds: &[CredentialRecord],
    options: &BatchOptions,
    sink: Arc<dyn DiagnosticSink>,
) -> Vec<ClaimResult> {
    let timeout = options.per_account_timeout;

    let mut handles = Vec::with_capacity(creds.len());
    for cred in creds {
        let client = Arc::clone(&client);
        let sink = Arc::clone(&sink);
        let cred = cred.clone();
        let label = cred.label.clone();

        let handle = tokio::spawn(async move {
            match tokio::time::timeout(timeout, resolve(client.as_ref(), &cred, sink.as_ref()))
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    sink.log(&format!(
                        "{}: gave up after {} seconds",
                        cred.label,
                        timeout.as_secs()
                    ));
                    ClaimResult::failed(&cred.label)
                }
            }
        });
        handles.push((label, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (label, handle) in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                sink.log(&format!("{}: claim task failed: {}", label, e));
                results.push(ClaimResult::failed(&label));
            }
        }
    }
    results
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{ClaimStatus, UNKNOWN};
    use crate::client::{
        ClaimOutcome, ClientError, GameAccount, RewardCycle, RewardItem, StaticAccountState,
        StaticRewardClient, GAME_TITLE,
    };
    use crate::diag::MemorySink;
    use async_trait::async_trait;

    fn cred(label: &str, ltuid: &str) -> CredentialRecord {
        CredentialRecord {
            label: label.to_string(),
            ltuid: ltuid.to_string(),
            ltoken: "tok".to_string(),
        }
    }

    fn populated_state(nickname: &str) -> StaticAccountState {
        StaticAccountState {
            accounts: vec![GameAccount {
                uid: "812345679".to_string(),
                level: 57,
                nickname: nickname.to_string(),
                server_name: "America Server".to_string(),
                title: GAME_TITLE.to_string(),
            }],
            cycle: RewardCycle {
                month: 8,
                signed_days: 12,
            },
            rewards: (1..=31)
                .map(|day| RewardItem {
                    name: format!("Reward {}", day),
                    amount: day,
                })
                .collect(),
            ..StaticAccountState::default()
        }
    }

    #[tokio::test]
    async fn returns_one_result_per_record_in_input_order() {
        let client = Arc::new(StaticRewardClient::new());
        let labels = ["ACCOUNT_A", "ACCOUNT_B", "ACCOUNT_C", "ACCOUNT_D"];
        let mut creds = Vec::new();
        for (i, label) in labels.iter().enumerate() {
            let ltuid = format!("{}", 100 + i);
            client.insert(&ltuid, populated_state(label));
            creds.push(cred(label, &ltuid));
        }

        let results = claim_all(
            client,
            &creds,
            &BatchOptions::default(),
            Arc::new(MemorySink::new()),
        )
        .await;

        assert_eq!(results.len(), labels.len());
        let out: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(out, labels);
    }

    #[tokio::test]
    async fn one_bad_account_does_not_affect_siblings() {
        let client = Arc::new(StaticRewardClient::new());
        client.insert("100", populated_state("first"));
        client.insert("300", populated_state("third"));
        // "200" is never registered, so its cookies are invalid

        let creds = vec![
            cred("ACCOUNT_A", "100"),
            cred("ACCOUNT_B", "200"),
            cred("ACCOUNT_C", "300"),
        ];
        let sink = Arc::new(MemorySink::new());
        let results = claim_all(client, &creds, &BatchOptions::default(), sink.clone()).await;

        assert_eq!(results[0].status, ClaimStatus::Claimed);
        assert_eq!(results[0].nickname, "first");
        assert_eq!(results[1].status, ClaimStatus::Failed);
        assert_eq!(results[1].nickname, UNKNOWN);
        assert_eq!(results[2].status, ClaimStatus::Claimed);
        assert_eq!(results[2].nickname, "third");
        assert_eq!(sink.lines().len(), 1);
        assert!(sink.lines()[0].contains("ACCOUNT_B"));
    }

    #[tokio::test]
    async fn end_to_end_statuses_for_mixed_batch() {
        let client = Arc::new(StaticRewardClient::new());
        client.insert("100", populated_state("fresh"));
        client.insert(
            "200",
            StaticAccountState {
                claimed_today: true,
                ..populated_state("earlier")
            },
        );

        let creds = vec![
            cred("ACCOUNT_A", "100"),
            cred("ACCOUNT_B", "200"),
            cred("ACCOUNT_C", "999"),
        ];
        let results = claim_all(
            client,
            &creds,
            &BatchOptions::default(),
            Arc::new(MemorySink::new()),
        )
        .await;

        let statuses: Vec<ClaimStatus> = results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                ClaimStatus::Claimed,
                ClaimStatus::AlreadyClaimed,
                ClaimStatus::Failed
            ]
        );
        assert_eq!(results[2].uid, UNKNOWN);
        assert_eq!(results[2].reward, UNKNOWN);
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let client = Arc::new(StaticRewardClient::new());
        let results = claim_all(
            client,
            &[],
            &BatchOptions::default(),
            Arc::new(MemorySink::new()),
        )
        .await;
        assert!(results.is_empty());
    }

    /// Client whose calls never complete, to exercise the timeout path.
    struct StallingClient;

    #[async_trait]
    impl RewardClient for StallingClient {
        async fn attempt_claim(
            &self,
            _cred: &CredentialRecord,
        ) -> Result<ClaimOutcome, ClientError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(ClaimOutcome::Claimed)
        }

        async fn game_accounts(
            &self,
            _cred: &CredentialRecord,
        ) -> Result<Vec<GameAccount>, ClientError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }

        async fn reward_cycle(
            &self,
            _cred: &CredentialRecord,
        ) -> Result<RewardCycle, ClientError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(RewardCycle {
                month: 1,
                signed_days: 1,
            })
        }

        async fn monthly_rewards(
            &self,
            _cred: &CredentialRecord,
        ) -> Result<Vec<RewardItem>, ClientError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_account_times_out_into_failed_row() {
        let client = Arc::new(StallingClient);
        let creds = vec![cred("ACCOUNT_A", "100")];
        let options = BatchOptions {
            per_account_timeout: Duration::from_secs(5),
        };
        let sink = Arc::new(MemorySink::new());

        let results = claim_all(client, &creds, &options, sink.clone()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ClaimStatus::Failed);
        assert!(sink.lines()[0].contains("ACCOUNT_A"));
        assert!(sink.lines()[0].contains("5 seconds"));
    }

    /// Client that panics, to exercise the join-error conversion.
    struct PanickingClient;

    #[async_trait]
    impl RewardClient for PanickingClient {
        async fn attempt_claim(
            &self,
            _cred: &CredentialRecord,
        ) -> Result<ClaimOutcome, ClientError> {
            panic!("scripted panic");
        }

        async fn game_accounts(
            &self,
            _cred: &CredentialRecord,
        ) -> Result<Vec<GameAccount>, ClientError> {
            panic!("scripted panic");
        }

        async fn reward_cycle(
            &self,
            _cred: &CredentialRecord,
        ) -> Result<RewardCycle, ClientError> {
            panic!("scripted panic");
        }

        async fn monthly_rewards(
            &self,
            _cred: &CredentialRecord,
        ) -> Result<Vec<RewardItem>, ClientError> {
            panic!("scripted panic");
        }
    }

    #[tokio::test]
    async fn panicking_task_becomes_failed_row_without_aborting_batch() {
        let valid = StaticRewardClient::new();
        valid.insert("100", populated_state("survivor"));

        // First record panics, second resolves normally against its own task
        struct SplitClient {
            panicking: PanickingClient,
            valid: StaticRewardClient,
        }

        #[async_trait]
        impl RewardClient for SplitClient {
            async fn attempt_claim(
                &self,
                cred: &CredentialRecord,
            ) -> Result<ClaimOutcome, ClientError> {
                if cred.ltuid == "bad" {
                    self.panicking.attempt_claim(cred).await
                } else {
                    self.valid.attempt_claim(cred).await
                }
            }

            async fn game_accounts(
                &self,
                cred: &CredentialRecord,
            ) -> Result<Vec<GameAccount>, ClientError> {
                self.valid.game_accounts(cred).await
            }

            async fn reward_cycle(
                &self,
                cred: &CredentialRecord,
            ) -> Result<RewardCycle, ClientError> {
                self.valid.reward_cycle(cred).await
            }

            async fn monthly_rewards(
                &self,
                cred: &CredentialRecord,
            ) -> Result<Vec<RewardItem>, ClientError> {
                self.valid.monthly_rewards(cred).await
            }
        }

        let client = Arc::new(SplitClient {
            panicking: PanickingClient,
            valid,
        });
        let creds = vec![cred("ACCOUNT_A", "bad"), cred("ACCOUNT_B", "100")];
        let sink = Arc::new(MemorySink::new());

        let results = claim_all(client, &creds, &BatchOptions::default(), sink.clone()).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, ClaimStatus::Failed);
        assert_eq!(results[1].status, ClaimStatus::Claimed);
        assert_eq!(results[1].nickname, "survivor");
        assert!(sink
            .lines()
            .iter()
            .any(|line| line.contains("ACCOUNT_A") && line.contains("task failed")));
    }
}
