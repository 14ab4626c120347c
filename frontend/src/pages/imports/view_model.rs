use crate::api::{ApiClient, ApiError, ImportJob};
use crate::components::feedback::MessageState;
use crate::pages::imports::{
    preview::{build_preview, ImportError, ImportFormat, ImportPreview},
    repository::ImportsRepository,
};
use crate::state::cache::use_caches;
use crate::utils::poll::{start_poll, PollHandle};
use leptos::*;
use std::rc::Rc;

pub const IMPORT_POLL_MS: u32 = 2_000;

/// A picked file that parsed cleanly and can be uploaded.
#[derive(Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub format: ImportFormat,
    pub bytes: Rc<Vec<u8>>,
}

#[derive(Clone, Copy)]
pub struct ImportViewModel {
    pub selected: RwSignal<Option<SelectedFile>>,
    pub preview: RwSignal<Option<ImportPreview>>,
    pub preview_error: RwSignal<Option<ImportError>>,
    pub active_job: RwSignal<Option<ImportJob>>,
    pub upload_action: Action<SelectedFile, Result<ImportJob, ApiError>>,
    pub history: Resource<u32, Result<Vec<ImportJob>, ApiError>>,
    pub message: RwSignal<MessageState>,
    poll: StoredValue<PollHandle>,
    repository: StoredValue<ImportsRepository>,
    reload: RwSignal<u32>,
}

impl ImportViewModel {
    /// Parses the picked file; only a clean preview makes it uploadable.
    pub fn select_file(&self, name: String, bytes: Vec<u8>) {
        self.message.update(MessageState::clear);
        match build_preview(&name, &bytes) {
            Ok(preview) => {
                self.selected.set(Some(SelectedFile {
                    name,
                    format: preview.format,
                    bytes: Rc::new(bytes),
                }));
                self.preview.set(Some(preview));
                self.preview_error.set(None);
            }
            Err(err) => {
                log::warn!("import preview failed for {}: {}", name, err);
                self.selected.set(None);
                self.preview.set(None);
                self.preview_error.set(Some(err));
            }
        }
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
        self.preview.set(None);
        self.preview_error.set(None);
    }

    pub fn can_upload(&self) -> bool {
        self.selected.with(Option::is_some)
            && !self.upload_action.pending().get()
            && !self.is_polling()
    }

    pub fn upload(&self) {
        if let Some(file) = self.selected.get_untracked() {
            self.upload_action.dispatch(file);
        }
    }

    pub fn is_polling(&self) -> bool {
        self.active_job.with(|job| needs_polling(job.as_ref()))
    }

    fn track(&self, job: ImportJob) {
        self.poll.update_value(PollHandle::cancel);
        let keep_polling = needs_polling(Some(&job));
        self.active_job.set(Some(job));
        if !keep_polling {
            self.finish();
            return;
        }
        let vm = *self;
        self.poll
            .set_value(start_poll(IMPORT_POLL_MS, move || vm.refresh_status()));
    }

    fn refresh_status(&self) {
        let Some(id) = self.active_job.get_untracked().map(|job| job.id) else {
            return;
        };
        let vm = *self;
        let repo = self.repository.get_value();
        spawn_local(async move {
            match repo.status(&id).await {
                Ok(job) => vm.apply_status(job),
                Err(err) => log::debug!("import status refresh failed: {}", err),
            }
        });
    }

    /// Applies a polled job; a no-op once the page has been torn down.
    fn apply_status(&self, job: ImportJob) {
        if !job.status.is_terminal() {
            self.active_job.try_set(Some(job));
            return;
        }
        if self.poll.try_update_value(PollHandle::cancel).is_none() {
            return;
        }
        self.active_job.set(Some(job));
        self.finish();
    }

    fn finish(&self) {
        if let Some(job) = self.active_job.get_untracked() {
            self.message.update(|m| {
                if job.failed_rows > 0 || job.status == crate::api::ImportJobStatus::Failed {
                    m.set_error(ApiError::unknown(job_summary(&job)));
                } else {
                    m.set_success(job_summary(&job));
                }
            });
        }
        self.reload.update(|value| *value = value.wrapping_add(1));
    }
}

pub fn needs_polling(job: Option<&ImportJob>) -> bool {
    job.map(|job| !job.status.is_terminal()).unwrap_or(false)
}

pub fn job_summary(job: &ImportJob) -> String {
    format!(
        "{}: {} of {} rows imported, {} failed.",
        job.status.label(),
        job.imported_rows,
        job.total_rows,
        job.failed_rows
    )
}

pub fn use_import_view_model() -> ImportViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(ImportsRepository::new(api, use_caches()));
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(MessageState::default());

    let history = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repository.get_value();
            async move { repo.history().await }
        },
    );

    let upload_action = create_action(move |file: &SelectedFile| {
        let repo = repository.get_value();
        let file = file.clone();
        async move { repo.upload(&file.name, &file.bytes, file.format).await }
    });

    let vm = ImportViewModel {
        selected: create_rw_signal(None),
        preview: create_rw_signal(None),
        preview_error: create_rw_signal(None),
        active_job: create_rw_signal(None),
        upload_action,
        history,
        message,
        poll: store_value(PollHandle::default()),
        repository,
        reload,
    };

    create_effect(move |_| match upload_action.value().get() {
        Some(Ok(job)) => {
            vm.clear_selection();
            vm.track(job);
        }
        Some(Err(err)) => {
            log::warn!("import upload failed: {}", err);
            message.update(|m| m.set_error(err));
        }
        None => {}
    });

    on_cleanup(move || {
        vm.poll.try_update_value(PollHandle::cancel);
    });

    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ImportJobStatus;
    use crate::test_support::ssr::with_runtime;
    use chrono::Utc;

    fn job(status: ImportJobStatus) -> ImportJob {
        ImportJob {
            id: "job-1".into(),
            file_name: "march.csv".into(),
            status,
            total_rows: 10,
            imported_rows: 8,
            failed_rows: 2,
            errors: vec!["Row 4: amount is required".into()],
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn polling_stops_once_job_is_terminal() {
        assert!(!needs_polling(None));
        assert!(needs_polling(Some(&job(ImportJobStatus::Pending))));
        assert!(needs_polling(Some(&job(ImportJobStatus::Processing))));
        assert!(!needs_polling(Some(&job(ImportJobStatus::Completed))));
        assert!(!needs_polling(Some(&job(ImportJobStatus::Failed))));
    }

    #[test]
    fn summary_counts_rows() {
        assert_eq!(
            job_summary(&job(ImportJobStatus::Completed)),
            "Completed: 8 of 10 rows imported, 2 failed."
        );
    }

    #[test]
    fn valid_file_becomes_uploadable() {
        with_runtime(|| {
            let vm = use_import_view_model();
            vm.select_file("march.csv".into(), b"date,amount\n2026-03-01,10\n".to_vec());
            assert!(vm.preview_error.get().is_none());
            assert_eq!(vm.preview.get().map(|p| p.total_rows), Some(1));
            assert!(vm.can_upload());
        });
    }

    #[test]
    fn unsupported_file_is_not_uploadable() {
        with_runtime(|| {
            let vm = use_import_view_model();
            vm.select_file("march.pdf".into(), b"%PDF".to_vec());
            assert!(matches!(
                vm.preview_error.get(),
                Some(ImportError::UnsupportedFormat(_))
            ));
            assert!(vm.selected.get().is_none());
            assert!(!vm.can_upload());
        });
    }

    #[test]
    fn tracking_a_pending_job_blocks_new_uploads() {
        with_runtime(|| {
            let vm = use_import_view_model();
            vm.select_file("march.csv".into(), b"date\n2026-03-01\n".to_vec());
            vm.track(job(ImportJobStatus::Pending));
            assert!(vm.is_polling());
            assert!(vm.poll.with_value(PollHandle::is_active));
            assert!(!vm.can_upload());
        });
    }

    #[test]
    fn tracking_a_finished_job_reports_outcome() {
        with_runtime(|| {
            let vm = use_import_view_model();
            vm.track(job(ImportJobStatus::Completed));
            assert!(!vm.is_polling());
            assert!(vm.message.get().error.is_some());
        });
    }

    #[test]
    fn status_arriving_after_teardown_is_ignored() {
        with_runtime(|| {
            let vm = use_import_view_model();
            vm.track(job(ImportJobStatus::Pending));
            vm.poll.dispose();
            vm.apply_status(job(ImportJobStatus::Completed));
            assert_eq!(
                vm.active_job.get().map(|job| job.status),
                Some(ImportJobStatus::Pending)
            );
            assert!(vm.message.get().error.is_none());
        });
    }

    #[test]
    fn terminal_status_stops_polling() {
        with_runtime(|| {
            let vm = use_import_view_model();
            vm.track(job(ImportJobStatus::Processing));
            vm.apply_status(job(ImportJobStatus::Failed));
            assert!(!vm.is_polling());
            assert!(!vm.poll.with_value(PollHandle::is_active));
            assert!(vm.message.get().error.is_some());
        });
    }
}
