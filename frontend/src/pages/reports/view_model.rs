use crate::api::{ApiClient, ApiError, DownloadedFile, ExportFormat, ReportQuery, ReportSummary};
use crate::components::feedback::MessageState;
use crate::pages::reports::{repository::ReportsRepository, utils::ReportFilterState};
use crate::utils::download::trigger_file_download;
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct ReportsViewModel {
    pub filters: ReportFilterState,
    pub applied: RwSignal<ReportQuery>,
    pub summary: Resource<ReportQuery, Result<ReportSummary, ApiError>>,
    pub export_format: RwSignal<ExportFormat>,
    pub export_action: Action<(ExportFormat, ReportQuery), Result<DownloadedFile, ApiError>>,
    pub filter_error: RwSignal<Option<ApiError>>,
    pub message: RwSignal<MessageState>,
}

impl ReportsViewModel {
    pub fn apply(&self) -> bool {
        match self.filters.to_query() {
            Ok(query) => {
                self.filter_error.set(None);
                self.applied.set(query);
                true
            }
            Err(err) => {
                self.filter_error.set(Some(err));
                false
            }
        }
    }

    pub fn export(&self) {
        if self.apply() {
            self.export_action
                .dispatch((self.export_format.get_untracked(), self.applied.get_untracked()));
        }
    }
}

pub fn use_reports_view_model() -> ReportsViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(ReportsRepository::new_with_client(Rc::new(api)));
    let filters = ReportFilterState::default();
    let applied = create_rw_signal(ReportQuery::default());
    let export_format = create_rw_signal(ExportFormat::default());
    let filter_error = create_rw_signal(None::<ApiError>);
    let message = create_rw_signal(MessageState::default());

    let summary = create_resource(
        move || applied.get(),
        move |query| {
            let repo = repository.get_value();
            async move { repo.summary(&query).await }
        },
    );

    let export_action = create_action(move |input: &(ExportFormat, ReportQuery)| {
        let repo = repository.get_value();
        let (format, query) = input.clone();
        async move { repo.export(format, query).await }
    });

    create_effect(move |_| match export_action.value().get() {
        Some(Ok(file)) => match trigger_file_download(&file) {
            Ok(()) => message.update(|m| m.set_success(format!("Downloaded {}.", file.file_name))),
            Err(err) => message.update(|m| m.set_error(ApiError::unknown(err))),
        },
        Some(Err(err)) => {
            log::warn!("report export failed: {}", err);
            message.update(|m| m.set_error(err));
        }
        None => {}
    });

    ReportsViewModel {
        filters,
        applied,
        summary,
        export_format,
        export_action,
        filter_error,
        message,
    }
}
