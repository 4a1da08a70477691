use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chat::script::{Action, Script};
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::RecordStore;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub stage: u32,
    #[serde(default)]
    pub candidate_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub reply: String,
    pub stage: u32,
    pub candidate_id: Option<i64>,
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = advance(state.store.as_ref(), &state.script, req).await?;
    Ok(Json(response))
}

/// Runs one wizard step: computes the transition and applies its store action.
pub async fn advance(
    store: &dyn RecordStore,
    script: &Script,
    req: ChatRequest,
) -> Result<ChatResponse, AppError> {
    let transition = script.transition(req.stage, &req.message);

    let candidate_id = match transition.action {
        Action::None => req.candidate_id,
        Action::Reset => None,
        Action::SelectVendor { ref name } => match store.find_vendor(name).await? {
            Some(vendor) => Some(store.create_candidate(Some(vendor.id)).await?),
            None => {
                warn!(input = %name, "Unknown vendor at selection stage");
                let rejected = script.vendor_rejected();
                return Ok(ChatResponse {
                    reply: rejected.reply,
                    stage: rejected.next_stage,
                    candidate_id: None,
                });
            }
        },
        Action::Create => Some(store.create_candidate(None).await?),
        Action::Update { field, ref value } => {
            let id = req.candidate_id.ok_or_else(|| {
                AppError::Validation(format!("candidate_id is required at stage {}", req.stage))
            })?;
            store.update_field(id, field, value).await?;
            Some(id)
        }
    };

    if transition.next_stage == script.terminal_stage() && req.stage < transition.next_stage {
        info!(?candidate_id, "Wizard answers complete, awaiting CV upload");
    }

    Ok(ChatResponse {
        reply: transition.reply,
        stage: transition.next_stage,
        candidate_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::script::{REPLY_COMPANY, REPLY_UPLOAD, REPLY_WAITING};
    use crate::config::IntakeMode;
    use crate::db::test_pool;
    use crate::store::{CandidateFilter, SqliteStore};

    fn vendor_script() -> Script {
        Script::new(IntakeMode::Vendor, vec!["XX".to_string(), "YY".to_string()])
    }

    fn req(message: &str, stage: u32, candidate_id: Option<i64>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            stage,
            candidate_id,
        }
    }

    async fn count(store: &SqliteStore) -> usize {
        store
            .list_candidates(CandidateFilter::All)
            .await
            .unwrap()
            .len()
    }

    #[tokio::test]
    async fn test_vendor_stage_zero_clears_client_candidate_id() {
        let store = SqliteStore::new(test_pool::seeded().await);
        let resp = advance(&store, &vendor_script(), req("hi", 0, Some(42)))
            .await
            .unwrap();
        assert_eq!(resp.stage, 1);
        assert_eq!(resp.candidate_id, None);
        assert_eq!(count(&store).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_vendors_never_create_records() {
        let store = SqliteStore::new(test_pool::seeded().await);
        let script = vendor_script();

        for input in ["zz", "", "X X", "xxx", "owner"] {
            let resp = advance(&store, &script, req(input, 1, None)).await.unwrap();
            assert_eq!(resp.stage, 1);
            assert_eq!(resp.candidate_id, None);
            assert_eq!(resp.reply, "Invalid vendor. Please type XX or YY.");
        }
        assert_eq!(count(&store).await, 0);
    }

    #[tokio::test]
    async fn test_vendor_name_creates_one_linked_record() {
        let store = SqliteStore::new(test_pool::seeded().await);
        let script = vendor_script();

        let resp = advance(&store, &script, req("yY", 1, None)).await.unwrap();
        assert_eq!(resp.reply, REPLY_COMPANY);
        assert_eq!(resp.stage, 2);

        let id = resp.candidate_id.expect("candidate created");
        let row = store.get_candidate(id).await.unwrap().unwrap();
        assert_eq!(row.vendor_id, Some(2));
        assert_eq!(count(&store).await, 1);
    }

    #[tokio::test]
    async fn test_full_vendor_walkthrough_populates_every_field() {
        let store = SqliteStore::new(test_pool::seeded().await);
        let script = vendor_script();

        let mut stage = 0;
        let mut candidate_id = None;
        for input in ["hi", "xx", "Acme", "Jane Doe", "jane@x.com", "3"] {
            let resp = advance(&store, &script, req(input, stage, candidate_id))
                .await
                .unwrap();
            stage = resp.stage;
            candidate_id = resp.candidate_id;
        }
        assert_eq!(stage, 6);

        let row = store
            .get_candidate(candidate_id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.vendor_id, Some(1));
        assert_eq!(row.company, "Acme");
        assert_eq!(row.name, "Jane Doe");
        assert_eq!(row.email, "jane@x.com");
        assert_eq!(row.experience, "3");
        assert!(row.cv_path.is_none());
    }

    #[tokio::test]
    async fn test_terminal_stage_echoes_without_writing() {
        let store = SqliteStore::new(test_pool::seeded().await);
        let script = vendor_script();
        let id = store.create_candidate(Some(1)).await.unwrap();

        let resp = advance(&store, &script, req("Jane", 6, Some(id))).await.unwrap();
        assert_eq!(
            resp,
            ChatResponse {
                reply: REPLY_WAITING.to_string(),
                stage: 6,
                candidate_id: Some(id),
            }
        );
        let row = store.get_candidate(id).await.unwrap().unwrap();
        assert_eq!(row.name, "");
    }

    #[tokio::test]
    async fn test_update_stage_without_candidate_is_rejected() {
        let store = SqliteStore::new(test_pool::seeded().await);
        let err = advance(&store, &vendor_script(), req("Acme", 2, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = advance(&store, &vendor_script(), req("Acme", 2, Some(77)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_simple_walkthrough_creates_unlinked_record() {
        let store = SqliteStore::new(test_pool::seeded().await);
        let script = Script::new(IntakeMode::Simple, Vec::new());

        let mut stage = 0;
        let mut candidate_id = None;
        let mut last_reply = String::new();
        for input in ["hello", "Jane Doe", "jane@x.com", "3"] {
            let resp = advance(&store, &script, req(input, stage, candidate_id))
                .await
                .unwrap();
            stage = resp.stage;
            candidate_id = resp.candidate_id;
            last_reply = resp.reply;
        }
        assert_eq!(stage, 4);
        assert_eq!(last_reply, REPLY_UPLOAD);

        let row = store
            .get_candidate(candidate_id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.vendor_id, None);
        assert_eq!(row.name, "Jane Doe");
        assert_eq!(row.email, "jane@x.com");
        assert_eq!(row.experience, "3");
        assert_eq!(row.company, "");
    }
}
