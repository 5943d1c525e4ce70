use leptos::*;
use strum::IntoEnumIterator;

use crate::{
    application::{ChartSlot, FetchOutcome, HistoryPager, IndicatorService, PendingRequest},
    config::config,
    domain::{
        events::{DashboardEvent, EventDispatcher, InMemoryEventDispatcher, NotificationLevel},
        history::{HistoryRepository, PromptType},
        indicators::IndicatorKind,
        logging::{LogComponent, LogEntry, Logger, get_logger, get_time_provider},
    },
    infrastructure::{CanvasSeriesRenderer, ConsoleLogger, DashboardHttpClient},
    presentation::{HistoryPresenter, HistoryView, IndicatorPresenter, IndicatorView, PageButton, RecordDetails},
};

const MAX_LOG_LINES: usize = 100;
const CANVAS_ID: &str = "indicator-canvas";
const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 400;

// Bridge between domain::logging and the in-page console
thread_local! {
    static GLOBAL_LOGS: RwSignal<Vec<String>> = create_rw_signal(Vec::new());
    static IS_LOG_PAUSED: RwSignal<bool> = create_rw_signal(false);
}

type Events = StoredValue<InMemoryEventDispatcher>;

fn publish(events: Option<Events>, event: DashboardEvent) {
    if let Some(events) = events {
        events.with_value(|dispatcher| dispatcher.publish(event));
    }
}

fn api_client() -> DashboardHttpClient {
    DashboardHttpClient::new(&config().api_base_url)
}

/// Mirrors every accepted entry into the debug console and the browser console
pub struct LeptosLogger {
    console: ConsoleLogger,
}

impl LeptosLogger {
    pub fn new(console: ConsoleLogger) -> Self {
        Self { console }
    }
}

impl Logger for LeptosLogger {
    fn log(&self, entry: LogEntry) {
        if !self.console.accepts(entry.level) {
            return;
        }
        let line = entry.format_line(&get_time_provider().format_timestamp(entry.timestamp));
        self.console.log(entry);

        GLOBAL_LOGS.with(|logs| {
            IS_LOG_PAUSED.with(|paused| {
                if !paused.get_untracked() {
                    logs.update(|lines| {
                        lines.push(line);
                        while lines.len() > MAX_LOG_LINES {
                            lines.remove(0);
                        }
                    });
                }
            });
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    level: NotificationLevel,
    message: String,
}

#[component]
pub fn App() -> impl IntoView {
    let toast = create_rw_signal::<Option<Toast>>(None);

    let mut dispatcher = InMemoryEventDispatcher::new();
    dispatcher.subscribe(move |event: &DashboardEvent| {
        if let Some((level, message)) = event.notification() {
            toast.set(Some(Toast { level, message }));
        }
    });
    provide_context::<Events>(store_value(dispatcher));

    view! {
        <style>{STYLES}</style>
        <div class="insight-dashboard">
            <header class="header">
                <h1>"Technical Indicators & Prompt History"</h1>
            </header>
            <ToastBanner toast=toast />
            <IndicatorPanel />
            <HistoryPanel />
            <DebugConsole />
        </div>
    }
}

#[component]
fn ToastBanner(toast: RwSignal<Option<Toast>>) -> impl IntoView {
    move || {
        toast.get().map(|t| {
            let class = match t.level {
                NotificationLevel::Success => "toast bg-success",
                NotificationLevel::Error => "toast bg-danger",
            };
            view! {
                <div class=class on:click=move |_| toast.set(None)>
                    {t.message}
                </div>
            }
        })
    }
}

#[component]
fn IndicatorPanel() -> impl IntoView {
    let events = use_context::<Events>();
    let symbol = create_rw_signal(String::new());
    let kind = create_rw_signal(IndicatorKind::Sma);
    let period = create_rw_signal::<Option<u32>>(None);
    let interpretation = create_rw_signal::<Option<IndicatorView>>(None);
    let chart_title = create_rw_signal(String::new());
    let loading = create_rw_signal(false);
    let latest_ticket = store_value(0u64);
    let chart = store_value(ChartSlot::new(CanvasSeriesRenderer::new(CANVAS_ID, CANVAS_WIDTH, CANVAS_HEIGHT)));

    let load = move || {
        let service = IndicatorService::new(api_client(), config().clone());
        let selected = kind.get_untracked();
        let request = match service.request_for(Some(&symbol.get_untracked()), selected, period.get_untracked()) {
            Ok(request) => request,
            Err(e) => {
                interpretation.set(Some(IndicatorPresenter::present_error(&e)));
                publish(events, DashboardEvent::IndicatorFailed { kind: selected, reason: e.to_string() });
                return;
            }
        };

        latest_ticket.update_value(|t| *t += 1);
        let ticket = latest_ticket.get_value();
        loading.set(true);

        spawn_local(async move {
            let result = service.load(&request).await;
            // A newer selection owns the chart now
            if latest_ticket.get_value() != ticket {
                return;
            }
            loading.set(false);

            match result {
                Ok(analysis) => {
                    chart.update_value(|slot| {
                        if let Err(e) = slot.show(&analysis.chart_title, &analysis.projection) {
                            get_logger().error(LogComponent::Presentation("IndicatorPanel"), &e.to_string());
                        }
                    });
                    chart_title.set(analysis.chart_title.clone());
                    interpretation.set(Some(IndicatorPresenter::present_result(&analysis.interpretation)));
                    publish(
                        events,
                        DashboardEvent::IndicatorLoaded {
                            symbol: analysis.symbol.clone(),
                            kind: analysis.kind,
                            points: analysis.series.len(),
                        },
                    );
                }
                Err(e) => {
                    chart.update_value(|slot| slot.clear());
                    chart_title.set(String::new());
                    interpretation.set(Some(IndicatorPresenter::present_error(&e)));
                    if !e.is_empty_state() {
                        publish(events, DashboardEvent::IndicatorFailed { kind: request.kind, reason: e.to_string() });
                    }
                }
            }
        });
    };

    view! {
        <section class="panel indicator-panel">
            <h2>"Technical Indicators"</h2>
            <div class="controls">
                <input
                    type="text"
                    placeholder="Symbol (e.g. AAPL)"
                    prop:value=move || symbol.get()
                    on:input=move |ev| symbol.set(event_target_value(&ev))
                />
                <select on:change=move |ev| {
                    if let Ok(selected) = event_target_value(&ev).parse::<IndicatorKind>() {
                        kind.set(selected);
                        period.set(None);
                        if !symbol.get_untracked().trim().is_empty() {
                            load();
                        }
                    }
                }>
                    {IndicatorKind::iter()
                        .map(|k| {
                            view! {
                                <option value=k.endpoint().to_string() selected=move || kind.get() == k>
                                    {k.display_name(config().period_for(k))}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <input
                    type="number"
                    min="1"
                    placeholder="Period"
                    prop:disabled=move || !kind.get().uses_period()
                    prop:value=move || period.get().map(|p| p.to_string()).unwrap_or_default()
                    on:input=move |ev| period.set(event_target_value(&ev).parse().ok())
                />
                <button class="btn" prop:disabled=move || loading.get() on:click=move |_| load()>
                    {move || if loading.get() { "Loading..." } else { "Load" }}
                </button>
            </div>
            <div class="chart-title">{move || chart_title.get()}</div>
            <canvas id=CANVAS_ID width=CANVAS_WIDTH height=CANVAS_HEIGHT class="indicator-canvas" />
            {move || {
                interpretation.get().map(|v| {
                    view! {
                        <div class=v.alert_class.clone()>
                            <strong>{v.headline.clone()}</strong>
                            {v.badge.clone().map(|b| view! { " - " <span class=b.class>{b.text}</span> })}
                            <br />
                            {(!v.detail.is_empty()).then(|| view! { <span>{v.detail.clone()}</span> <br /> })}
                            <small>{v.rationale.clone()}</small>
                        </div>
                    }
                })
            }}
        </section>
    }
}

#[component]
fn HistoryPanel() -> impl IntoView {
    let events = use_context::<Events>();
    let pager = store_value(HistoryPager::new(config().default_page_size));
    let history = create_rw_signal::<Option<HistoryView>>(None);
    let error_row = create_rw_signal::<Option<String>>(None);
    let loading = create_rw_signal(false);
    let details = create_rw_signal::<Option<RecordDetails>>(None);

    let run = move |request: PendingRequest| {
        loading.set(true);
        spawn_local(async move {
            let result = api_client().fetch_page(&request.query).await;
            match pager.try_update_value(|p| p.complete(&request, result)) {
                Some(FetchOutcome::Loaded(records)) => {
                    loading.set(false);
                    error_row.set(None);
                    let view = pager.with_value(|p| HistoryPresenter::present(&records, p.state()));
                    publish(
                        events,
                        DashboardEvent::HistoryPageLoaded { page: view.current_page - 1, records: records.len() },
                    );
                    history.set(Some(view));
                }
                Some(FetchOutcome::Failed(e)) => {
                    loading.set(false);
                    error_row.set(Some(HistoryPresenter::error_row(&e)));
                    publish(events, DashboardEvent::HistoryFetchFailed { reason: e.detail() });
                }
                Some(FetchOutcome::Discarded) | None => {}
            }
        });
    };

    let go_to = move |page: i64| match pager.try_update_value(|p| p.go_to_page(page)) {
        Some(Ok(request)) => run(request),
        Some(Err(e)) => get_logger().warn(LogComponent::Presentation("HistoryPanel"), &e.to_string()),
        None => {}
    };

    let reload = move || {
        if let Some(request) = pager.try_update_value(|p| p.reload()) {
            run(request);
        }
    };

    let view_details = move |id: i64| {
        spawn_local(async move {
            match api_client().fetch_record(id).await {
                Ok(record) => details.set(Some(HistoryPresenter::details(&record))),
                Err(e) => publish(events, DashboardEvent::RecordDetailsFailed { id, reason: e.detail() }),
            }
        });
    };

    let delete = move |id: i64| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Are you sure you want to delete this history record?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api_client().delete_record(id).await {
                Ok(()) => {
                    publish(events, DashboardEvent::HistoryRecordDeleted { id });
                    reload();
                }
                Err(e) => publish(events, DashboardEvent::HistoryDeleteFailed { id, reason: e.detail() }),
            }
        });
    };

    reload();

    let page_link = move |button: PageButton| {
        let class = if button.disabled {
            "page-item disabled"
        } else if button.active {
            "page-item active"
        } else {
            "page-item"
        };
        let target = button.page;
        let disabled = button.disabled;
        view! {
            <li class=class>
                <a class="page-link" href="#" on:click=move |ev| {
                    ev.prevent_default();
                    if let (false, Some(page)) = (disabled, target) {
                        go_to(i64::from(page));
                    }
                }>
                    {button.label}
                </a>
            </li>
        }
    };

    view! {
        <section class="panel history-panel">
            <h2>"Prompt History"</h2>
            <div class="controls">
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    if let Some(request) = pager.try_update_value(|p| p.set_prompt_filter(Some(value.as_str()))) {
                        run(request);
                    }
                }>
                    <option value="">"All types"</option>
                    {PromptType::iter()
                        .map(|t| view! { <option value=t.as_ref().to_string()>{t.label()}</option> })
                        .collect_view()}
                </select>
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        match pager.try_update_value(|p| p.set_page_size(size)) {
                            Some(Ok(request)) => run(request),
                            Some(Err(e)) => get_logger().warn(LogComponent::Presentation("HistoryPanel"), &e.to_string()),
                            None => {}
                        }
                    }
                }>
                    {config()
                        .page_size_options
                        .iter()
                        .map(|size| {
                            let size = *size;
                            view! {
                                <option value=size.to_string() selected={size == config().default_page_size}>
                                    {size}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <button class="btn" on:click=move |_| {
                    if let Some(request) = pager.try_update_value(|p| p.toggle_sort()) {
                        run(request);
                    }
                }>
                    {move || {
                        history
                            .get()
                            .map(|h| h.sort_label)
                            .unwrap_or_else(|| pager.with_value(|p| format!("Sort: {}", p.state().sort_direction.label())))
                    }}
                </button>
                <span class="loading">{move || if loading.get() { "Loading..." } else { "" }}</span>
            </div>

            <div class="stats">
                {move || {
                    history.get().map(|h| {
                        view! {
                            <span>"Total: " {h.total_items}</span>
                            <span>"Page " {h.current_page} " of " {h.total_pages}</span>
                            <span>"Showing " {h.summary}</span>
                        }
                    })
                }}
            </div>

            <table class="history-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Date"</th>
                        <th>"Type"</th>
                        <th>"Provider"</th>
                        <th>"Model"</th>
                        <th>"Tokens"</th>
                        <th>"Time"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        if let Some(message) = error_row.get() {
                            return view! { <tr><td colspan="8" class="text-danger">{message}</td></tr> }.into_view();
                        }
                        match history.get() {
                            None => view! { <tr><td colspan="8">"Loading..."</td></tr> }.into_view(),
                            Some(HistoryView { empty_message: Some(message), .. }) => {
                                view! { <tr><td colspan="8" class="text-muted">{message}</td></tr> }.into_view()
                            }
                            Some(h) => h
                                .rows
                                .into_iter()
                                .map(|row| {
                                    let id = row.id;
                                    view! {
                                        <tr>
                                            <td>{row.id}</td>
                                            <td>{row.timestamp}</td>
                                            <td><span class="badge bg-info">{row.type_label}</span></td>
                                            <td>{row.provider}</td>
                                            <td>{row.model}</td>
                                            <td>{row.tokens}</td>
                                            <td>{row.latency}</td>
                                            <td>
                                                <button class="btn btn-sm" on:click=move |_| view_details(id)>"View"</button>
                                                <button class="btn btn-sm btn-danger" on:click=move |_| delete(id)>"Delete"</button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view(),
                        }
                    }}
                </tbody>
            </table>

            {move || {
                history.get().filter(|h| h.pagination.visible).map(|h| {
                    let pagination = h.pagination;
                    view! {
                        <ul class="pagination">
                            {page_link(pagination.previous)}
                            {pagination.pages.into_iter().map(page_link).collect_view()}
                            {page_link(pagination.next)}
                        </ul>
                    }
                })
            }}

            {move || {
                details.get().map(|d| {
                    view! {
                        <div class="record-details">
                            <button class="btn btn-sm close" on:click=move |_| details.set(None)>"Close"</button>
                            <dl>
                                <dt>"ID"</dt><dd>{d.id}</dd>
                                <dt>"Date"</dt><dd>{d.timestamp}</dd>
                                <dt>"Type"</dt><dd>{d.type_label}</dd>
                                <dt>"Provider"</dt><dd>{d.provider}</dd>
                                <dt>"Model"</dt><dd>{d.model}</dd>
                                <dt>"Tokens"</dt><dd>{d.tokens}</dd>
                                <dt>"Response time (ms)"</dt><dd>{d.response_time}</dd>
                            </dl>
                            <h4>"Input parameters"</h4>
                            <pre>{d.input_parameters}</pre>
                            <h4>"Prompt"</h4>
                            <pre>{d.prompt}</pre>
                            <h4>"Response"</h4>
                            <pre>{d.response}</pre>
                        </div>
                    }
                })
            }}
        </section>
    }
}

#[component]
fn DebugConsole() -> impl IntoView {
    let logs = GLOBAL_LOGS.with(|logs| *logs);
    let is_paused = IS_LOG_PAUSED.with(|paused| *paused);

    view! {
        <div class="debug-console">
            <div class="debug-header">
                <span>"Debug Console"</span>
                <button
                    class="debug-btn"
                    on:click=move |_| {
                        is_paused.update(|p| *p = !*p);
                        get_logger().info(
                            LogComponent::Presentation("DebugConsole"),
                            if is_paused.get_untracked() { "Logging paused" } else { "Logging resumed" },
                        );
                    }
                >
                    {move || if is_paused.get() { "Resume" } else { "Pause" }}
                </button>
                <button class="debug-btn" on:click=move |_| logs.set(Vec::new())>
                    "Clear"
                </button>
            </div>
            <div class="debug-log">
                {move || {
                    logs.get()
                        .into_iter()
                        .map(|line| view! { <div class="log-line">{line}</div> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

const STYLES: &str = r#"
.insight-dashboard { font-family: -apple-system, BlinkMacSystemFont, sans-serif; padding: 20px; color: #222; }
.header { margin-bottom: 20px; }
.panel { background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 16px; margin-bottom: 20px; }
.controls { display: flex; gap: 8px; align-items: center; margin-bottom: 12px; }
.chart-title { font-weight: 600; margin: 8px 0; }
.indicator-canvas { border: 1px solid #eee; border-radius: 6px; }
.alert { padding: 12px; border-radius: 6px; margin-top: 12px; }
.alert-info { background: #e7f3fe; }
.alert-success { background: #e6f4ea; }
.alert-danger { background: #fdecea; }
.alert-warning { background: #fff8e1; }
.badge { padding: 2px 8px; border-radius: 10px; color: #fff; font-size: 0.85em; }
.bg-success { background: #198754; color: #fff; }
.bg-danger { background: #dc3545; color: #fff; }
.bg-secondary { background: #6c757d; }
.bg-info { background: #0dcaf0; }
.toast { position: fixed; top: 16px; right: 16px; padding: 12px 16px; border-radius: 6px; cursor: pointer; }
.history-table { width: 100%; border-collapse: collapse; }
.history-table th, .history-table td { border-bottom: 1px solid #eee; padding: 6px; text-align: left; }
.text-danger { color: #dc3545; text-align: center; }
.text-muted { color: #6c757d; text-align: center; }
.stats { display: flex; gap: 16px; margin-bottom: 8px; }
.pagination { display: flex; list-style: none; gap: 4px; padding: 0; }
.page-item.active .page-link { background: #0d6efd; color: #fff; }
.page-item.disabled .page-link { color: #aaa; pointer-events: none; }
.page-link { display: block; padding: 4px 10px; border: 1px solid #ddd; border-radius: 4px; text-decoration: none; }
.record-details pre { background: #f8f9fa; padding: 8px; white-space: pre-wrap; }
.debug-console { background: #111; color: #9f9; font-family: monospace; font-size: 12px; border-radius: 6px; }
.debug-header { display: flex; gap: 8px; padding: 6px; border-bottom: 1px solid #333; }
.debug-log { max-height: 200px; overflow-y: auto; padding: 6px; }
"#;
