use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use sparks_shared::{breakdown, format_sparks, PeriodResult, RequestSequencer, ShareCard, UserBreakdown};

use crate::data::{self, LoadFailure, LoadState};
use crate::share::ShareModal;
use crate::widgets::{rank_class, rank_text, LoadErrorPanel};

#[derive(Clone, Debug, PartialEq)]
enum Lookup {
    Pending,
    Failed(LoadFailure),
    Done(Option<UserBreakdown>),
}

/// `/user/:address`: one address across the overall board and every week.
#[component]
pub fn UserBreakdownView() -> impl IntoView {
    let params = use_params_map();
    let address = move || {
        params
            .read()
            .get("address")
            .map(|a| a.to_string())
            .unwrap_or_default()
    };

    let (state, set_state) = signal(LoadState::Loading);
    let loads = RequestSequencer::new();
    data::spawn_load(loads.clone(), set_state);
    on_cleanup({
        let loads = loads.clone();
        move || loads.cancel()
    });

    let (sharing, set_sharing) = signal(None::<ShareCard>);

    let lookup = Memo::new(move |_| {
        state.with(|s| match s {
            LoadState::Loading => Lookup::Pending,
            LoadState::Failed(f) => Lookup::Failed(f.clone()),
            LoadState::Ready(board) => Lookup::Done(breakdown(board, &address())),
        })
    });

    view! {
        <div class="space-y-6">
            <A href="/">
                <span class="text-yellow-700 hover:underline">"← Back to leaderboard"</span>
            </A>
            {move || match lookup.get() {
                Lookup::Pending => {
                    view! {
                        <div class="bg-white rounded-lg shadow-lg p-6 animate-pulse space-y-4">
                            <div class="h-6 w-1/2 bg-gray-200 rounded"></div>
                            <div class="h-10 w-1/3 bg-gray-200 rounded"></div>
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                                {(0..4).map(|_| view! { <div class="h-24 bg-gray-100 rounded"></div> }).collect_view()}
                            </div>
                        </div>
                    }
                        .into_any()
                }
                Lookup::Failed(failure) => {
                    let loads = loads.clone();
                    view! {
                        <LoadErrorPanel
                            failure=failure
                            on_retry=Callback::new(move |_| data::spawn_load(loads.clone(), set_state))
                        />
                    }
                        .into_any()
                }
                Lookup::Done(None) => {
                    view! {
                        <div class="bg-white rounded-lg shadow-lg p-6 text-center space-y-2">
                            <h2 class="text-xl font-semibold text-gray-800">"Address not found"</h2>
                            <p class="font-mono text-sm text-gray-500 break-all">{address()}</p>
                            <p class="text-gray-600">"This address is not on the overall board or any week."</p>
                        </div>
                    }
                        .into_any()
                }
                Lookup::Done(Some(user)) => {
                    view! {
                        <BreakdownCard
                            user=user
                            on_share=Callback::new(move |card| set_sharing.set(Some(card)))
                        />
                    }
                        .into_any()
                }
            }}
            {move || {
                sharing
                    .get()
                    .map(|card| {
                        view! { <ShareModal card=card on_close=Callback::new(move |_| set_sharing.set(None)) /> }
                    })
            }}
        </div>
    }
}

#[component]
fn BreakdownCard(user: UserBreakdown, on_share: Callback<ShareCard>) -> impl IntoView {
    let card = ShareCard::new(user.overall.sparks(), user.address.clone(), user.overall.rank);
    let overall_rank = user.overall.rank;
    let overall_sparks = format_sparks(user.overall.sparks());
    let summary = format!(
        "{} Sparks across weeks, ranked in {} of {}",
        format_sparks(user.weekly_total()),
        user.weeks_ranked(),
        user.weeks.len()
    );
    let UserBreakdown { address, weeks, .. } = user;

    view! {
        <div class="space-y-6">
            <div class="bg-white rounded-lg shadow-lg p-6 space-y-4">
                <div class="flex flex-wrap justify-between items-start gap-4">
                    <div class="space-y-1">
                        <h1 class="text-2xl font-bold text-gray-800">"Sparks Breakdown"</h1>
                        <p class="font-mono text-sm text-gray-500 break-all">{address}</p>
                    </div>
                    <button
                        class="bg-yellow-500 text-white px-4 py-2 rounded hover:bg-yellow-600 font-semibold"
                        on:click=move |_| on_share.run(card.clone())
                    >
                        "Share"
                    </button>
                </div>
                <div class="flex flex-wrap gap-6 items-end">
                    <div>
                        <div class="text-4xl font-bold text-yellow-600">"🔥 " {overall_sparks}</div>
                        <div class="text-sm text-gray-500">"Overall Sparks"</div>
                    </div>
                    <span class=format!("px-3 py-1 rounded-full border font-semibold {}", rank_class(overall_rank))>
                        {rank_text(overall_rank)}
                    </span>
                    <div class="text-sm text-gray-500">{summary}</div>
                </div>
            </div>
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                {weeks.into_iter().map(|week| view! { <WeekCard result=week /> }).collect_view()}
            </div>
            <div class="text-center text-sm text-gray-500">
                "Dashboard by "
                <a href="https://twitter.com/magicianafk" target="_blank" rel="noopener noreferrer" class="text-yellow-700 hover:underline">
                    "@magicianafk"
                </a>
            </div>
        </div>
    }
}

#[component]
fn WeekCard(result: PeriodResult) -> impl IntoView {
    let sparks = result
        .entry
        .as_ref()
        .map(|e| format_sparks(e.sparks))
        .unwrap_or_else(|| "—".to_string());
    let extra = result
        .entry
        .as_ref()
        .and_then(|e| e.extra().map(|(label, value)| format!("{label}: {value}")));

    view! {
        <div class=format!("rounded-lg border p-4 space-y-2 {}", rank_class(result.rank))>
            <div class="flex justify-between items-center">
                <h3 class="font-semibold">{result.period.label()}</h3>
                <span class="text-sm">{rank_text(result.rank)}</span>
            </div>
            <div class="text-2xl font-bold">{sparks}</div>
            {extra.map(|text| view! { <div class="text-xs opacity-80">{text}</div> })}
        </div>
    }
}
