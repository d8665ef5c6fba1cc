use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use gloo_timers::callback::Timeout;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;
use yew_hooks::use_window_size;

use smart_agenda_shared::calendar::{
    self, CalendarLayout, CalendarState, PickerPosition, SCROLL_DELAY_MS, ScrollTarget,
};
use smart_agenda_shared::format;
use smart_agenda_shared::schedule::{AvailabilityOracle, FixedScheduleOracle};

#[derive(Properties, PartialEq)]
pub struct ScheduleCalendarProps {
    pub state: CalendarState,
    pub on_change: Callback<CalendarState>,
}

fn scroll_into_view(node: &NodeRef) {
    let Some(element) = node.cast::<web_sys::Element>() else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Month picker, the day's slots and a summary of the chosen slot.
#[function_component(ScheduleCalendar)]
pub fn schedule_calendar(props: &ScheduleCalendarProps) -> Html {
    let today = chrono::Local::now().date_naive();
    let initial = props.state.date().unwrap_or(today);
    let visible = use_state(|| (initial.year(), initial.month()));
    let oracle = use_memo((), |_| FixedScheduleOracle::new());
    let (viewport_width, _) = use_window_size();
    let slot_panel = use_node_ref();
    let summary_panel = use_node_ref();
    let scroll_timer = use_mut_ref(|| None::<Timeout>);

    let layout = CalendarLayout::for_state(&props.state);

    // Emit the transition and, on small screens, bring the new panel into view
    let change: Rc<dyn Fn(CalendarState)> = {
        let previous = props.state.clone();
        let on_change = props.on_change.clone();
        let slot_panel = slot_panel.clone();
        let summary_panel = summary_panel.clone();
        Rc::new(move |next: CalendarState| {
            let target = calendar::scroll_target(&previous, &next, viewport_width);
            on_change.emit(next);
            if let Some(target) = target {
                let node = match target {
                    ScrollTarget::SlotPanel => slot_panel.clone(),
                    ScrollTarget::SummaryPanel => summary_panel.clone(),
                };
                *scroll_timer.borrow_mut() =
                    Some(Timeout::new(SCROLL_DELAY_MS, move || scroll_into_view(&node)));
            }
        })
    };

    let shift = |delta: i32| {
        let visible = visible.clone();
        Callback::from(move |_: MouseEvent| {
            let (year, month) = *visible;
            visible.set(calendar::shift_month(year, month, delta));
        })
    };
    let prev_month = shift(-1);
    let next_month = shift(1);

    let (year, month) = *visible;
    let selected = props.state.date();

    let weeks = calendar::month_grid(year, month)
        .into_iter()
        .map(|week| {
            let days = week
                .into_iter()
                .map(|day| match day {
                    None => html! { <div class="h-10" /> },
                    Some(date) => {
                        let is_selected = selected == Some(date);
                        let onclick = {
                            let change = change.clone();
                            let state = props.state.clone();
                            // Clicking the selected day clears it
                            let pick: Option<NaiveDate> = (!is_selected).then_some(date);
                            Callback::from(move |_: MouseEvent| change(state.select_date(pick)))
                        };
                        let classes = if is_selected {
                            "h-10 w-10 rounded-full bg-blue-600 text-white text-sm"
                        } else if date == today {
                            "h-10 w-10 rounded-full border border-blue-600 text-blue-600 text-sm hover:bg-blue-50"
                        } else {
                            "h-10 w-10 rounded-full text-gray-800 text-sm hover:bg-gray-100"
                        };
                        html! {
                            <button type="button" class={classes} {onclick}>{date.day().to_string()}</button>
                        }
                    }
                })
                .collect::<Html>();
            html! { <div class="grid grid-cols-7 gap-1 justify-items-center">{days}</div> }
        })
        .collect::<Html>();

    let picker_position = match layout.picker {
        PickerPosition::Centered => "mx-auto",
        PickerPosition::Offset => "mx-auto lg:ml-[15%]",
        PickerPosition::Left => "mx-auto lg:mx-0",
    };

    let slots = selected
        .map(|date| {
            oracle
                .slots_for(date)
                .into_iter()
                .map(|slot| {
                    let chosen = props.state.slot().is_some_and(|s| s.time == slot.time);
                    let onclick = {
                        let change = change.clone();
                        let state = props.state.clone();
                        let oracle = oracle.clone();
                        let time = slot.time.clone();
                        Callback::from(move |_: MouseEvent| change(state.select_slot(&time, &*oracle)))
                    };
                    let classes = match (chosen, slot.available) {
                        (true, _) => "px-3 py-2 rounded-md text-sm bg-blue-600 text-white",
                        (false, true) => "px-3 py-2 rounded-md text-sm border border-green-500 text-green-700 hover:bg-green-50",
                        (false, false) => "px-3 py-2 rounded-md text-sm border border-gray-200 bg-gray-100 text-gray-400",
                    };
                    html! {
                        <button key={slot.time.clone()} type="button" class={classes} {onclick}>{slot.time}</button>
                    }
                })
                .collect::<Html>()
        })
        .unwrap_or_default();

    html! {
        <div class="flex flex-col lg:flex-row gap-6">
            <div class={classes!("w-full", "max-w-sm", "bg-white", "rounded-lg", "border", "border-gray-200", "p-4", picker_position)}>
                <div class="flex items-center justify-between mb-4">
                    <button type="button" onclick={prev_month} class="p-2 rounded hover:bg-gray-100">{"‹"}</button>
                    <span class="font-medium text-gray-900">{format!("{} {}", format::month_name(month), year)}</span>
                    <button type="button" onclick={next_month} class="p-2 rounded hover:bg-gray-100">{"›"}</button>
                </div>
                <div class="grid grid-cols-7 gap-1 justify-items-center mb-2">
                    {format::WEEKDAY_INITIALS.iter().map(|d| html! {
                        <span class="text-xs font-medium text-gray-500">{*d}</span>
                    }).collect::<Html>()}
                </div>
                <div class="space-y-1">{weeks}</div>
            </div>

            if layout.slots_visible {
                <div ref={slot_panel} class="w-full lg:w-64 bg-white rounded-lg border border-gray-200 p-4">
                    <h3 class="font-medium text-gray-900 mb-2">{"Selecione um horário"}</h3>
                    <div class="flex gap-4 mb-3 text-xs text-gray-600">
                        <span class="flex items-center gap-1"><span class="w-3 h-3 rounded-full bg-green-500" />{"Disponível"}</span>
                        <span class="flex items-center gap-1"><span class="w-3 h-3 rounded-full bg-gray-300" />{"Ocupado"}</span>
                    </div>
                    <div class="grid grid-cols-3 gap-2 max-h-80 overflow-y-auto">{slots}</div>
                </div>
            }

            if layout.summary_visible {
                <div ref={summary_panel} class="w-full lg:w-72 bg-white rounded-lg border border-gray-200 p-4 space-y-3">
                    if let (Some(date), Some(slot)) = (props.state.date(), props.state.slot()) {
                        <p class="font-medium text-gray-900">{format::date_with_weekday(date)}</p>
                        <p class="text-sm text-gray-700">
                            {"Você selecionou o horário: "}<strong>{slot.time.clone()}</strong>
                        </p>
                        if slot.available {
                            <div class="px-3 py-2 rounded-md bg-green-50 text-green-700 text-sm">{"Disponível"}</div>
                        } else {
                            <div class="px-3 py-2 rounded-md bg-red-50 text-red-700 text-sm">{"Indisponível"}</div>
                        }
                    }
                </div>
            }
        </div>
    }
}
