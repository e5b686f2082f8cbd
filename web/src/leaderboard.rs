use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use sparks_shared::rank::{page_window, PageLink};
use sparks_shared::{
    format_sparks, truncate_address, PageRequest, Period, PeriodKind, RequestSequencer, Standing,
};

use crate::data::{self, LoadState};
use crate::widgets::{skeleton_rows, LoadErrorPanel};

const SEARCH_DEBOUNCE_MS: u32 = 300;
const SKELETON_ROWS: usize = 8;
const PAGE_RADIUS: usize = 1;

#[component]
pub fn LeaderboardView() -> impl IntoView {
    let (state, set_state) = signal(LoadState::Loading);
    let loads = RequestSequencer::new();
    let searches = RequestSequencer::new();

    data::spawn_load(loads.clone(), set_state);
    on_cleanup({
        let loads = loads.clone();
        let searches = searches.clone();
        move || {
            loads.cancel();
            searches.cancel();
        }
    });

    let (period, set_period) = signal(Period::Overall);
    let (page, set_page) = signal(1usize);
    let (query, set_query) = signal(String::new());
    let (term, set_term) = signal(String::new());
    let (searching, set_searching) = signal(false);

    let select_period = move |p: Period| {
        set_period.set(p);
        set_page.set(1);
    };

    let on_search = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        set_query.set(value.clone());
        set_searching.set(true);
        let ticket = searches.begin();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if !ticket.is_current() {
                return;
            }
            set_term.set(value.trim().to_string());
            set_page.set(1);
            set_searching.set(false);
        });
    };

    let current = Memo::new(move |_| {
        state.with(|s| match s {
            LoadState::Ready(board) => {
                Some(board.search(period.get(), &term.get(), PageRequest::Page(page.get())))
            }
            _ => None,
        })
    });

    let periods = move || {
        state.with(|s| match s {
            LoadState::Ready(board) => board.periods(),
            _ => vec![Period::Overall],
        })
    };

    let sheet_notice = move || {
        state.with(|s| match s {
            LoadState::Ready(board) => board
                .board(period.get())
                .and_then(|b| b.issue())
                .map(|issue| issue.to_string()),
            _ => None,
        })
    };

    let failure = move || {
        state.with(|s| match s {
            LoadState::Failed(f) => Some(f.clone()),
            _ => None,
        })
    };

    let rows = move || {
        if searching.get() || state.with(|s| matches!(s, LoadState::Loading)) {
            return skeleton_rows(SKELETON_ROWS).into_any();
        }
        match current.get() {
            Some(p) if p.data.is_empty() => {
                let term = term.get();
                let message = if term.is_empty() {
                    "No entries on this board yet.".to_string()
                } else {
                    format!("No results for \"{term}\".")
                };
                view! { <div class="px-4 py-8 text-center text-gray-500">{message}</div> }.into_any()
            }
            Some(p) => p
                .data
                .into_iter()
                .map(|standing| view! { <StandingRow standing=standing /> })
                .collect_view()
                .into_any(),
            None => ().into_any(),
        }
    };

    let total_pages = move || current.get().map(|p| p.total_pages).unwrap_or(0);

    view! {
        <div class="space-y-6">
            <header class="text-center space-y-2">
                <h1 class="text-4xl font-bold text-yellow-600">{move || period.get().title()}</h1>
                <p class="text-sm text-gray-500">"Find your address, then open it for a week-by-week breakdown."</p>
            </header>

            {move || {
                failure()
                    .map(|failure| {
                        let loads = loads.clone();
                        view! {
                            <LoadErrorPanel
                                failure=failure
                                on_retry=Callback::new(move |_| data::spawn_load(loads.clone(), set_state))
                            />
                        }
                    })
            }}

            <Show when=move || failure().is_none()>
                <nav class="flex flex-wrap gap-2 justify-center">
                    <For
                        each=periods
                        key=|p| *p
                        children=move |p| {
                            view! {
                                <button
                                    class=move || {
                                        if period.get() == p {
                                            "px-4 py-2 rounded bg-yellow-500 text-white font-semibold"
                                        } else {
                                            "px-4 py-2 rounded bg-white text-gray-700 hover:bg-yellow-100"
                                        }
                                    }
                                    on:click=move |_| select_period(p)
                                >
                                    {p.label()}
                                </button>
                            }
                        }
                    />
                </nav>

                <input
                    type="text"
                    class="border rounded px-3 py-2 w-full"
                    placeholder="Search by address"
                    prop:value=query
                    on:input=on_search.clone()
                />

                {move || {
                    sheet_notice()
                        .map(|msg| {
                            view! {
                                <div class="p-3 bg-yellow-50 border border-yellow-300 text-yellow-800 rounded text-sm">
                                    {msg}
                                </div>
                            }
                        })
                }}

                <div class="bg-white rounded-lg shadow-lg overflow-hidden">
                    <div class="grid grid-cols-12 gap-4 px-4 py-2 text-xs uppercase text-gray-500 border-b">
                        <span class="col-span-2">"Rank"</span>
                        <span class="col-span-5">"Address"</span>
                        <span class="col-span-2 text-right">"Sparks"</span>
                        <span class="col-span-3 text-right">{move || extra_label(period.get())}</span>
                    </div>
                    {rows}
                </div>

                {move || {
                    let total = total_pages();
                    (total > 1)
                        .then(|| {
                            view! {
                                <Pagination
                                    page=page
                                    total=total
                                    on_select=Callback::new(move |p| set_page.set(p))
                                />
                            }
                        })
                }}
            </Show>
        </div>
    }
}

fn extra_label(period: Period) -> &'static str {
    match period.kind() {
        PeriodKind::Overall => "",
        PeriodKind::VerificationWeek => "Hot Sloth Verification",
        PeriodKind::NftWeek => "NFT Collection",
        PeriodKind::BonusWeek => "Referral Bonus",
    }
}

#[component]
fn StandingRow(standing: Standing) -> impl IntoView {
    let address = standing.entry.address.clone();
    let href = format!("/user/{}", String::from(js_sys::encode_uri_component(&address)));
    let extra = standing
        .entry
        .extra()
        .map(|(_, value)| value.to_string())
        .unwrap_or_default();

    view! {
        <A href=href>
            <div class="grid grid-cols-12 gap-4 px-4 py-3 border-b hover:bg-yellow-50 cursor-pointer">
                <span class="col-span-2 font-semibold text-gray-700">"#" {standing.rank}</span>
                <span class="col-span-5 font-mono text-sm" title=address.clone()>
                    {truncate_address(&address, 6, 4)}
                </span>
                <span class="col-span-2 text-right font-semibold text-yellow-700">
                    {format_sparks(standing.entry.sparks)}
                </span>
                <span class="col-span-3 text-right text-sm text-gray-600">{extra}</span>
            </div>
        </A>
    }
}

#[component]
fn Pagination(page: ReadSignal<usize>, total: usize, on_select: Callback<usize>) -> impl IntoView {
    let step = "px-3 py-1 rounded bg-white border hover:bg-yellow-50 disabled:opacity-40";

    view! {
        <nav class="flex items-center justify-center gap-1">
            <button
                class=step
                disabled=move || page.get() <= 1
                on:click=move |_| on_select.run(page.get_untracked().saturating_sub(1).max(1))
            >
                "Previous"
            </button>
            {move || {
                page_window(page.get(), total, PAGE_RADIUS)
                    .into_iter()
                    .map(|link| match link {
                        PageLink::Page(n) => {
                            view! {
                                <button
                                    class=move || {
                                        if page.get() == n {
                                            "px-3 py-1 rounded bg-yellow-500 text-white font-semibold"
                                        } else {
                                            "px-3 py-1 rounded bg-white border hover:bg-yellow-50"
                                        }
                                    }
                                    on:click=move |_| on_select.run(n)
                                >
                                    {n}
                                </button>
                            }
                                .into_any()
                        }
                        PageLink::Ellipsis => {
                            view! { <span class="px-2 text-gray-400">"…"</span> }.into_any()
                        }
                    })
                    .collect_view()
            }}
            <button
                class=step
                disabled=move || page.get() >= total
                on:click=move |_| on_select.run((page.get_untracked() + 1).min(total))
            >
                "Next"
            </button>
        </nav>
    }
}
