use leptos::prelude::*;

use crate::config;
use crate::data::LoadFailure;

/// Blocking panel shown when no workbook could be loaded.
#[component]
pub fn LoadErrorPanel(failure: LoadFailure, on_retry: Callback<()>) -> impl IntoView {
    let (path, set_path) = signal(config::stored_custom_path().unwrap_or_default());

    let use_path = move |_| {
        config::store_custom_path(&path.get_untracked());
        on_retry.run(());
    };

    view! {
        <div class="bg-white rounded-lg shadow-lg p-6 border border-red-300 space-y-4">
            <h2 class="text-xl font-semibold text-red-700">"Could not load the leaderboard"</h2>
            <p class="text-gray-700">{failure.message}</p>
            <ul class="text-sm text-gray-500 list-disc pl-5 break-all">
                {failure.details.into_iter().map(|d| view! { <li>{d}</li> }).collect_view()}
            </ul>
            <button
                class="bg-yellow-500 text-white px-4 py-2 rounded hover:bg-yellow-600"
                on:click=move |_| on_retry.run(())
            >
                "Retry"
            </button>
            <div class="flex gap-2">
                <input
                    type="text"
                    class="border rounded px-3 py-2 flex-1"
                    placeholder="Custom path, e.g. /assets/Firewall Sparks Leaderboard.xlsx"
                    prop:value=path
                    on:input=move |ev| set_path.set(event_target_value(&ev))
                />
                <button
                    class="bg-gray-700 text-white px-4 py-2 rounded hover:bg-gray-800"
                    on:click=use_path
                >
                    "Load from path"
                </button>
            </div>
        </div>
    }
}

/// Grey placeholder rows while data is in flight.
pub fn skeleton_rows(count: usize) -> impl IntoView {
    (0..count)
        .map(|_| {
            view! {
                <div class="grid grid-cols-12 gap-4 px-4 py-3 border-b animate-pulse">
                    <div class="col-span-2 h-4 bg-gray-200 rounded"></div>
                    <div class="col-span-5 h-4 bg-gray-200 rounded"></div>
                    <div class="col-span-2 h-4 bg-gray-200 rounded"></div>
                    <div class="col-span-3 h-4 bg-gray-100 rounded"></div>
                </div>
            }
        })
        .collect_view()
}

/// Tailwind classes for a rank badge: podium colours for the top three.
pub fn rank_class(rank: Option<usize>) -> &'static str {
    match rank {
        Some(1) => "bg-yellow-100 border-yellow-400 text-yellow-800",
        Some(2) => "bg-gray-100 border-gray-400 text-gray-700",
        Some(3) => "bg-orange-100 border-orange-400 text-orange-800",
        Some(_) => "bg-white border-gray-200 text-gray-800",
        None => "bg-gray-50 border-gray-200 text-gray-400",
    }
}

pub fn rank_text(rank: Option<usize>) -> String {
    rank.map(|r| format!("#{r}"))
        .unwrap_or_else(|| "Not ranked".to_string())
}
