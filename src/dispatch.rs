use crate::errors::AppError;
use crate::records::{RecordDraft, RecordFields, RecordId, StoreKind};
use crate::render::{self, StoreView};
use crate::state::AppState;
use crate::storage;
use crate::validate;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    Add { payload: RecordDraft },
    Update { id: RecordId, payload: RecordDraft },
    Remove { id: RecordId },
    Clear,
}

/// One user intention against one store. Every mutation in the system goes
/// through here, so validation, persistence, and re-rendering happen
/// exactly once per intent instead of being re-wired per tracker.
#[derive(Debug, Deserialize)]
pub struct Intent {
    pub store: StoreKind,
    #[serde(flatten)]
    pub action: Action,
}

fn checked_fields(store: StoreKind, payload: RecordDraft) -> Result<RecordFields, AppError> {
    if payload.kind() != store {
        return Err(AppError::bad_request(format!(
            "payload variant does not belong to the {} store",
            store.storage_key()
        )));
    }
    Ok(validate::validate_draft(payload)?)
}

/// Routes an intent: validate, mutate, persist the snapshot, and return the
/// re-rendered store view. A failed validation leaves the store untouched.
pub async fn dispatch(state: &AppState, intent: Intent) -> Result<StoreView, AppError> {
    let kind = intent.store;
    let mut stores = state.stores.lock().await;

    match intent.action {
        Action::Add { payload } => {
            let fields = checked_fields(kind, payload)?;
            let record = stores.get_mut(kind).add(fields, Utc::now().timestamp_millis());
            debug!(store = kind.storage_key(), id = record.id, "record added");
        }
        Action::Update { id, payload } => {
            let fields = checked_fields(kind, payload)?;
            if stores.get_mut(kind).update(id, fields).is_none() {
                return Err(AppError::not_found(format!(
                    "no record {id} in the {} store",
                    kind.storage_key()
                )));
            }
        }
        Action::Remove { id } => {
            if !stores.get_mut(kind).remove(id) {
                debug!(store = kind.storage_key(), id, "remove of missing id ignored");
            }
        }
        Action::Clear => stores.get_mut(kind).replace_all(Vec::new()),
    }

    storage::persist_store(&state.data_dir, kind, stores.get(kind).all()).await?;
    Ok(render::render_store(&stores, kind))
}

/// Revokes every caregiver invite matching the given email. Returns how
/// many invites were removed alongside the refreshed view.
pub async fn revoke_invites(state: &AppState, email: &str) -> Result<(usize, StoreView), AppError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::bad_request("caregiver email is required"));
    }

    let mut stores = state.stores.lock().await;
    let kind = StoreKind::CaregiverInvites;
    let ids: Vec<RecordId> = stores
        .get(kind)
        .all()
        .iter()
        .filter_map(|record| match &record.fields {
            RecordFields::CaregiverInvite(invite) if invite.email == email => Some(record.id),
            _ => None,
        })
        .collect();

    let store = stores.get_mut(kind);
    for id in &ids {
        store.remove(*id);
    }
    if !ids.is_empty() {
        storage::persist_store(&state.data_dir, kind, stores.get(kind).all()).await?;
    }
    Ok((ids.len(), render::render_store(&stores, kind)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pulse::PulseMonitor;
    use crate::records::{CalorieItemDraft, CaregiverInviteDraft, HydrationEventDraft};
    use crate::store::StoreSet;
    use std::path::PathBuf;
    use tokio::fs;

    async fn test_state(label: &str) -> AppState {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!(
            "carebuddy_dispatch_{label}_{}_{}",
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).await.unwrap();
        AppState::new(dir, StoreSet::new(), PulseMonitor::new())
    }

    async fn cleanup(dir: PathBuf) {
        let _ = fs::remove_dir_all(dir).await;
    }

    fn calorie_draft(name: &str) -> RecordDraft {
        RecordDraft::CalorieItem(CalorieItemDraft {
            name: name.to_string(),
            cal_per_serving: 150.0,
            servings: 2.0,
        })
    }

    #[tokio::test]
    async fn add_persists_and_renders() {
        let state = test_state("add").await;

        let view = dispatch(
            &state,
            Intent {
                store: StoreKind::CalorieData,
                action: Action::Add {
                    payload: calorie_draft("Oatmeal"),
                },
            },
        )
        .await
        .unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].cells[0], "Oatmeal");

        let reloaded = storage::load_store(&state.data_dir, StoreKind::CalorieData).await;
        assert_eq!(reloaded.len(), 1);

        cleanup(state.data_dir.clone()).await;
    }

    #[tokio::test]
    async fn invalid_payload_leaves_store_untouched() {
        let state = test_state("invalid").await;

        let err = dispatch(
            &state,
            Intent {
                store: StoreKind::CalorieData,
                action: Action::Add {
                    payload: RecordDraft::CalorieItem(CalorieItemDraft {
                        name: "  ".to_string(),
                        cal_per_serving: 150.0,
                        servings: 1.0,
                    }),
                },
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert!(state.stores.lock().await.get(StoreKind::CalorieData).is_empty());

        cleanup(state.data_dir.clone()).await;
    }

    #[tokio::test]
    async fn mismatched_variant_rejected() {
        let state = test_state("mismatch").await;

        let err = dispatch(
            &state,
            Intent {
                store: StoreKind::HydrationIntake,
                action: Action::Add {
                    payload: calorie_draft("Oatmeal"),
                },
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);

        cleanup(state.data_dir.clone()).await;
    }

    #[tokio::test]
    async fn remove_missing_id_is_a_no_op() {
        let state = test_state("remove").await;
        dispatch(
            &state,
            Intent {
                store: StoreKind::HydrationIntake,
                action: Action::Add {
                    payload: RecordDraft::HydrationEvent(HydrationEventDraft { amount_ml: 250.0 }),
                },
            },
        )
        .await
        .unwrap();

        let view = dispatch(
            &state,
            Intent {
                store: StoreKind::HydrationIntake,
                action: Action::Remove { id: 404 },
            },
        )
        .await
        .unwrap();
        assert_eq!(view.rows.len(), 1);

        cleanup(state.data_dir.clone()).await;
    }

    #[tokio::test]
    async fn revoke_removes_all_matching_invites() {
        let state = test_state("revoke").await;
        for email in ["ana@example.com", "ana@example.com", "ben@example.com"] {
            dispatch(
                &state,
                Intent {
                    store: StoreKind::CaregiverInvites,
                    action: Action::Add {
                        payload: RecordDraft::CaregiverInvite(CaregiverInviteDraft {
                            name: "Ana".to_string(),
                            email: email.to_string(),
                            relation: "Sister".to_string(),
                            shared_trackers: vec![],
                            access_duration: "30 days".to_string(),
                            message: String::new(),
                        }),
                    },
                },
            )
            .await
            .unwrap();
        }

        let (revoked, view) = revoke_invites(&state, " ana@example.com ").await.unwrap();
        assert_eq!(revoked, 2);
        assert_eq!(view.rows.len(), 1);

        let (revoked, _) = revoke_invites(&state, "ana@example.com").await.unwrap();
        assert_eq!(revoked, 0);

        cleanup(state.data_dir.clone()).await;
    }
}
