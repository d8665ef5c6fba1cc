use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yew_router::prelude::*;

use smart_agenda_shared::format;
use smart_agenda_shared::organization::{NOT_FOUND_MESSAGE, OrganizationGuard, validate_organization_id};

use crate::Route;
use crate::hooks::use_current_user;

#[derive(Properties, PartialEq)]
pub struct OrganizationLayoutProps {
    pub organization_id: String,
    pub children: Html,
}

/// Sidebar shell for every organization-scoped page. Pages only render
/// once the route's organization id is usable.
#[function_component(OrganizationLayout)]
pub fn organization_layout(props: &OrganizationLayoutProps) -> Html {
    let navigator = use_navigator();
    let guard = validate_organization_id(Some(&props.organization_id));
    let sidebar_collapsed = use_state(|| false);
    let current_route = use_route::<Route>().unwrap_or(Route::Home);

    // Invalid id: show the notice, then leave
    use_effect_with(guard.clone(), move |guard| {
        let timer = match guard {
            OrganizationGuard::NotFound { delay_ms, .. } => navigator.map(|navigator| {
                Timeout::new(*delay_ms, move || navigator.push(&Route::Home))
            }),
            OrganizationGuard::Valid(_) => None,
        };
        move || drop(timer)
    });

    let Some(organization_id) = guard.id().map(str::to_string) else {
        return html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-50">
                <p class="text-lg text-gray-600">{NOT_FOUND_MESSAGE}</p>
            </div>
        };
    };

    let toggle_sidebar = {
        let sidebar_collapsed = sidebar_collapsed.clone();
        Callback::from(move |_| sidebar_collapsed.set(!*sidebar_collapsed))
    };
    let sidebar_width = if *sidebar_collapsed { "w-16" } else { "w-64" };
    let collapsed = *sidebar_collapsed;
    let id = organization_id.clone();

    html! {
        <div class="min-h-screen bg-gray-50 flex">
            <aside class={format!("bg-white border-r border-gray-200 flex-shrink-0 transition-all duration-200 {}", sidebar_width)}>
                <div class="h-full flex flex-col">
                    <div class="p-2 border-b border-gray-200 flex items-center justify-between">
                        if !collapsed {
                            <span class="px-2 font-semibold text-gray-900">{"Smart Agenda"}</span>
                        }
                        <button onclick={toggle_sidebar} class="text-gray-500 hover:text-gray-900 p-2 rounded hover:bg-gray-100">
                            {if collapsed { "»" } else { "«" }}
                        </button>
                    </div>
                    <nav class="flex-1 overflow-y-auto py-4 space-y-1 px-2">
                        <SidebarLink route={Route::Home} label="Home" {collapsed} current={current_route.clone()} />
                        <SidebarLink route={Route::Agenda { organization_id: id.clone() }} label="Agenda" {collapsed} current={current_route.clone()} />
                        <SidebarLink route={Route::Contacts { organization_id: id.clone() }} label="Contatos" {collapsed} current={current_route.clone()} />
                        <SidebarLink route={Route::Schedule { organization_id: id.clone() }} label="Agendamento" {collapsed} current={current_route.clone()} />
                        <SidebarLink route={Route::Services { organization_id: id.clone() }} label="Serviços" {collapsed} current={current_route.clone()} />
                        <SidebarLink route={Route::SpaceOfService { organization_id: id }} label="Espaço de Serviço" {collapsed} current={current_route} />
                    </nav>
                </div>
            </aside>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-auto">
                    { props.children.clone() }
                </main>
            </div>
        </div>
    }
}

/// Greeting, today's date and the user's avatar initials.
#[function_component(Header)]
fn header() -> Html {
    let user = use_current_user();
    let name = user.data.as_ref().map(|u| u.name.clone());
    let today = chrono::Local::now().date_naive();

    html! {
        <header class="bg-white border-b border-gray-200 h-16 flex-shrink-0 flex items-center justify-between px-6">
            <div>
                <p class="text-gray-900 font-medium">
                    {format!("Olá, {}", name.clone().unwrap_or_default())}
                </p>
                <p class="text-gray-500 text-sm">{format::long_date(today)}</p>
            </div>
            <div class="w-10 h-10 bg-blue-500 rounded-full flex items-center justify-center">
                <span class="text-white text-sm font-medium">{format::initials(name.as_deref())}</span>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarLinkProps {
    route: Route,
    label: &'static str,
    collapsed: bool,
    current: Route,
}

#[function_component(SidebarLink)]
fn sidebar_link(props: &SidebarLinkProps) -> Html {
    let is_active = props.route == props.current;
    let classes = if is_active {
        "flex items-center px-3 py-2 rounded-lg bg-blue-600 text-white"
    } else {
        "flex items-center px-3 py-2 rounded-lg text-gray-700 hover:bg-gray-100 hover:text-gray-900"
    };
    let initial: String = props.label.chars().take(1).collect();

    html! {
        <Link<Route> to={props.route.clone()} classes={classes}>
            <span class="w-5 text-center font-semibold">{initial}</span>
            if !props.collapsed {
                <span class="ml-3">{props.label}</span>
            }
        </Link<Route>>
    }
}
