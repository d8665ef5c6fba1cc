use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yew_router::prelude::*;

use smart_agenda_shared::organization::{NOT_FOUND_REDIRECT_MS, unmatched_path_notice};

mod components;
mod config;
mod hooks;
mod logging;
mod pages;
mod services;

use components::{
    LoginForm, error_handler::GlobalErrorHandler, layout::OrganizationLayout,
    toast::ToastProvider,
};
use config::AppConfig;
use hooks::QueryProvider;
use pages::{
    agenda::AgendaPage, appointment_detail::AppointmentDetailPage, contacts::ContactsPage,
    home::HomePage, new_organization::NewOrganizationPage, schedule::SchedulePage,
    service_catalog::ServiceCatalogPage, space_of_service::SpaceOfServicePage,
};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/log-in")]
    Login,
    #[at("/home")]
    Home,
    #[at("/new-organization")]
    NewOrganization,
    #[at("/organizations/:organization_id/agenda")]
    Agenda { organization_id: String },
    #[at("/organizations/:organization_id/agenda/:id")]
    AppointmentDetail { organization_id: String, id: String },
    #[at("/organizations/:organization_id/contacts")]
    Contacts { organization_id: String },
    #[at("/organizations/:organization_id/schedule")]
    Schedule { organization_id: String },
    #[at("/organizations/:organization_id/services")]
    Services { organization_id: String },
    #[at("/organizations/:organization_id/space-of-service")]
    SpaceOfService { organization_id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn organization_page(organization_id: String, page: Html) -> Html {
    html! {
        <OrganizationLayout {organization_id}>
            {page}
        </OrganizationLayout>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Root => {
            let authenticated = services::with_session(|session| session.is_authenticated());
            if authenticated {
                html! { <Redirect<Route> to={Route::Home} /> }
            } else {
                html! { <Redirect<Route> to={Route::Login} /> }
            }
        }
        Route::Login => html! { <LoginPage /> },
        Route::Home => html! { <HomePage /> },
        Route::NewOrganization => html! { <NewOrganizationPage /> },
        Route::Agenda { organization_id } => organization_page(
            organization_id.clone(),
            html! { <AgendaPage {organization_id} /> },
        ),
        Route::AppointmentDetail { organization_id, id } => organization_page(
            organization_id.clone(),
            html! { <AppointmentDetailPage {organization_id} {id} /> },
        ),
        Route::Contacts { organization_id } => organization_page(
            organization_id.clone(),
            html! { <ContactsPage {organization_id} /> },
        ),
        Route::Schedule { organization_id } => organization_page(
            organization_id.clone(),
            html! { <SchedulePage {organization_id} /> },
        ),
        Route::Services { organization_id } => organization_page(
            organization_id.clone(),
            html! { <ServiceCatalogPage {organization_id} /> },
        ),
        Route::SpaceOfService { organization_id } => organization_page(
            organization_id.clone(),
            html! { <SpaceOfServicePage {organization_id} /> },
        ),
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(LoginPage)]
fn login_page() -> Html {
    let navigator = use_navigator();

    let on_login = Callback::from(move |_| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    html! {
        <LoginForm {on_login} />
    }
}

/// Unmatched paths show a notice and return to the home page.
#[function_component(NotFoundPage)]
fn not_found_page() -> Html {
    let navigator = use_navigator();
    let path = use_location().map(|l| l.path().to_string()).unwrap_or_default();

    use_effect_with((), move |_| {
        let timer = navigator
            .map(|navigator| Timeout::new(NOT_FOUND_REDIRECT_MS, move || navigator.push(&Route::Home)));
        move || drop(timer)
    });

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-gray-900">{"404"}</h1>
                <p class="text-xl mt-4 text-gray-500">{unmatched_path_notice(&path)}</p>
                <Link<Route> to={Route::Home} classes="mt-6 inline-block text-blue-600 hover:underline">
                    {"Voltar para o início"}
                </Link<Route>>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <QueryProvider>
            <ToastProvider>
                <BrowserRouter>
                    <GlobalErrorHandler />
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ToastProvider>
        </QueryProvider>
    }
}

/// Inject the stylesheet link into `<head>`.
fn load_stylesheet(href: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(head) = document.head() else {
        return;
    };
    let appended = document.create_element("link").and_then(|link| {
        link.set_attribute("href", href)?;
        link.set_attribute("rel", "stylesheet")?;
        head.append_child(&link)
    });
    if let Err(e) = appended {
        tracing::warn!(href, error = ?e, "could not load stylesheet");
    }
}

fn main() {
    let config = AppConfig::from_env();
    logging::init(config.log_level);
    tracing::info!(api_url = %config.api_url, "starting smart agenda");

    // Load Tailwind CSS
    load_stylesheet("https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css");

    yew::Renderer::<App>::new().render();
}
