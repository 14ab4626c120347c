use crate::api::{ImportJob, ImportJobStatus};
use crate::components::{
    empty_state::EmptyState,
    error::InlineErrorMessage,
    feedback::MessageBanner,
    layout::{Layout, LoadingSpinner},
};
use crate::pages::imports::{
    preview::{ImportPreview, PREVIEW_ROWS},
    view_model::{job_summary, use_import_view_model, ImportViewModel},
};
use crate::utils::time::format_datetime;
use leptos::*;

fn job_status_class(status: ImportJobStatus) -> &'static str {
    match status {
        ImportJobStatus::Pending | ImportJobStatus::Processing => "text-status-warning-text",
        ImportJobStatus::Completed => "text-status-success-text",
        ImportJobStatus::Failed => "text-status-error-text",
    }
}

#[component]
fn FilePicker(vm: ImportViewModel) -> impl IntoView {
    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                vm.clear_selection();
                return;
            };
            spawn_local(async move {
                match crate::utils::download::read_file_bytes(&file).await {
                    Ok(bytes) => vm.select_file(file.name(), bytes),
                    Err(err) => log::error!("could not read import file: {}", err),
                }
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = (ev, vm);
    };

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 flex flex-wrap items-center gap-3">
            <input
                id="import-file"
                type="file"
                accept=".csv,.xlsx"
                class="text-sm"
                on:change=on_change
            />
            <button
                id="import-upload"
                type="button"
                class="px-3 py-2 rounded text-sm text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                disabled=move || !vm.can_upload()
                aria-disabled=move || (!vm.can_upload()).to_string()
                on:click=move |_| vm.upload()
            >
                {move || if vm.upload_action.pending().get() { "Uploading..." } else { "Upload" }}
            </button>
            {move || vm.preview_error.get().map(|err| view! {
                <p class="w-full text-sm text-status-error-text" role="alert">{err.to_string()}</p>
            })}
        </div>
    }
}

#[component]
fn PreviewTable(preview: ImportPreview) -> impl IntoView {
    let caption = if preview.is_truncated() {
        format!("Showing the first {} of {} rows", PREVIEW_ROWS, preview.total_rows)
    } else {
        format!("{} rows", preview.total_rows)
    };
    view! {
        <div class="bg-surface-elevated shadow rounded-lg overflow-x-auto">
            <p class="px-4 py-2 text-xs text-fg-muted" id="import-preview-caption">{caption}</p>
            <table class="min-w-full divide-y divide-border text-sm">
                <thead class="bg-surface-muted">
                    <tr>
                        {preview.headers.into_iter().map(|h| view! {
                            <th class="px-3 py-2 text-left text-xs font-medium text-fg-muted">{h}</th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {preview.rows.into_iter().map(|row| view! {
                        <tr>
                            {row.into_iter().map(|cell| view! { <td class="px-3 py-1 text-fg">{cell}</td> }).collect_view()}
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn JobProgress(job: ImportJob) -> impl IntoView {
    let in_flight = !job.status.is_terminal();
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-2" id="import-job" data-status=format!("{:?}", job.status)>
            <div class="flex items-center gap-2 text-sm">
                {in_flight.then(|| view! { <i class="fas fa-spinner animate-spin" aria-hidden="true"></i> })}
                <span class=job_status_class(job.status)>{job.status.label()}</span>
                <span class="text-fg-muted">{job.file_name.clone()}</span>
            </div>
            <p class="text-sm text-fg">{job_summary(&job)}</p>
            {(!job.errors.is_empty()).then(|| view! {
                <ul class="list-disc list-inside text-xs text-status-error-text">
                    {job.errors.iter().map(|e| view! { <li>{e.clone()}</li> }).collect_view()}
                </ul>
            })}
        </div>
    }
}

#[component]
fn ImportHistory(jobs: Vec<ImportJob>) -> impl IntoView {
    if jobs.is_empty() {
        return view! { <EmptyState title="No imports yet" icon="fa-file-import" /> }.into_view();
    }
    view! {
        <table class="min-w-full bg-surface-elevated shadow rounded-lg divide-y divide-border">
            <tbody class="divide-y divide-border">
                {jobs.into_iter().map(|job| view! {
                    <tr>
                        <td class="px-4 py-2 text-sm text-fg">{job.file_name.clone()}</td>
                        <td class="px-4 py-2 text-sm text-fg-muted">{format_datetime(&job.created_at)}</td>
                        <td class=format!("px-4 py-2 text-sm {}", job_status_class(job.status))>{job.status.label()}</td>
                        <td class="px-4 py-2 text-sm text-right">{format!("{}/{}", job.imported_rows, job.total_rows)}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

#[component]
pub fn ImportPage() -> impl IntoView {
    let vm = use_import_view_model();
    view! {
        <Layout>
            <div class="space-y-6">
                <div>
                    <h1 class="text-2xl font-bold text-fg">"Import expenses"</h1>
                    <p class="text-sm text-fg-muted">"Upload a CSV or Excel file. Check the preview before uploading."</p>
                </div>
                <MessageBanner message=vm.message />
                <FilePicker vm=vm />
                {move || vm.active_job.get().map(|job| view! { <JobProgress job=job /> })}
                {move || vm.preview.get().map(|preview| view! { <PreviewTable preview=preview /> })}
                <section class="space-y-2">
                    <h2 class="text-lg font-semibold text-fg">"History"</h2>
                    <Transition fallback=|| view! { <LoadingSpinner /> }>
                        {move || vm.history.get().map(|result| match result {
                            Ok(jobs) => view! { <ImportHistory jobs=jobs /> }.into_view(),
                            Err(err) => {
                                let error = Signal::derive(move || Some(err.clone()));
                                view! { <InlineErrorMessage error=error /> }.into_view()
                            }
                        })}
                    </Transition>
                </section>
            </div>
        </Layout>
    }
}
