mod chart;

use backoffice_shared::DEFAULT_USER_LABEL;
use backoffice_shared::dashboard::{active_services, recent_users, revenue, top_services};
use backoffice_shared::format::format_clp;
use backoffice_shared::protocol::{ListSales, ListServices, ListUsers};
use leptos::prelude::*;

use crate::components::common::{PageHeader, SKELETON_ROWS};
use crate::components::icons::{Activity, Briefcase, DollarSign, ShoppingCart, UsersIcon};
use crate::query::use_query;
use chart::BarChart;

#[component]
fn StatCard(
    title: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] detail: Signal<String>,
    #[prop(into)] loading: Signal<bool>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="stat bg-base-100 rounded-box shadow">
            <div class="stat-figure text-primary">{children()}</div>
            <div class="stat-title">{title}</div>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="skeleton h-8 w-24 my-1"></div> }
            >
                <div class="stat-value text-2xl">{move || value.get()}</div>
            </Show>
            <div class="stat-desc">{move || detail.get()}</div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let users = use_query(ListUsers);
    let services = use_query(ListServices);
    let sales = use_query(ListSales);

    let user_count = Signal::derive(move || {
        users.data.with(|d| d.as_ref().map_or(0, Vec::len)).to_string()
    });
    let service_count = Signal::derive(move || {
        services.data.with(|d| d.as_ref().map_or(0, Vec::len)).to_string()
    });
    let active_count = Signal::derive(move || {
        let active = services
            .data
            .with(|d| d.as_deref().map_or(0, active_services));
        format!("{} activos", active)
    });
    let sale_count = Signal::derive(move || {
        sales.data.with(|d| d.as_ref().map_or(0, |p| p.data.len())).to_string()
    });
    let total_revenue = Signal::derive(move || {
        format_clp(sales.data.with(|d| d.as_ref().map_or(0.0, |p| revenue(&p.data))))
    });

    let chart_data = Signal::derive(move || {
        services.data.with(|s| {
            sales.data.with(|p| {
                let rows = p.as_ref().map(|p| p.data.as_slice()).unwrap_or_default();
                top_services(s.as_deref().unwrap_or_default(), rows)
            })
        })
    });
    let chart_loading = move || services.is_loading() || sales.is_loading();

    let recent = move || {
        users
            .data
            .with(|d| d.as_deref().map(recent_users))
            .unwrap_or_default()
    };

    view! {
        <PageHeader title="Dashboard" description="Resumen general del sistema" />

        <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-4">
            <StatCard
                title="Total Usuarios"
                value=user_count
                detail="Usuarios registrados".to_string()
                loading=Signal::derive(move || users.is_loading())
            >
                <UsersIcon attr:class="h-8 w-8" />
            </StatCard>
            <StatCard
                title="Servicios"
                value=service_count
                detail=active_count
                loading=Signal::derive(move || services.is_loading())
            >
                <Briefcase attr:class="h-8 w-8" />
            </StatCard>
            <StatCard
                title="Ventas"
                value=sale_count
                detail="Ventas registradas".to_string()
                loading=Signal::derive(move || sales.is_loading())
            >
                <ShoppingCart attr:class="h-8 w-8" />
            </StatCard>
            <StatCard
                title="Ingresos"
                value=total_revenue
                detail="Total acumulado".to_string()
                loading=Signal::derive(move || sales.is_loading())
            >
                <DollarSign attr:class="h-8 w-8" />
            </StatCard>
        </div>

        <div class="grid gap-4 lg:grid-cols-7">
            <div class="card bg-base-100 shadow lg:col-span-4">
                <div class="card-body">
                    <h3 class="card-title gap-2">
                        <Activity attr:class="h-5 w-5 text-primary" /> "Servicios Más Usados"
                    </h3>
                    <Show
                        when=move || !chart_loading()
                        fallback=|| view! { <div class="skeleton h-72 w-full"></div> }
                    >
                        <Show
                            when=move || chart_data.with(|d| !d.is_empty())
                            fallback=|| view! {
                                <p class="py-16 text-center text-base-content/50">"Sin servicios registrados"</p>
                            }
                        >
                            <BarChart data=chart_data />
                        </Show>
                    </Show>
                </div>
            </div>

            <div class="card bg-base-100 shadow lg:col-span-3">
                <div class="card-body">
                    <h3 class="card-title">"Usuarios Recientes"</h3>
                    <Show
                        when=move || !users.is_loading()
                        fallback=|| {
                            (0..SKELETON_ROWS)
                                .map(|_| view! { <div class="skeleton h-10 w-full"></div> })
                                .collect_view()
                        }
                    >
                        <Show
                            when=move || !recent().is_empty()
                            fallback=|| view! {
                                <p class="py-8 text-center text-base-content/50">"No hay usuarios registrados"</p>
                            }
                        >
                            <ul class="space-y-3">
                                <For
                                    each=recent
                                    key=|u| u.clone()
                                    children=|user| {
                                        let name = if user.name.trim().is_empty() {
                                            DEFAULT_USER_LABEL.to_string()
                                        } else {
                                            user.name.clone()
                                        };
                                        let initial = name.chars().next().unwrap_or('U').to_uppercase().to_string();
                                        view! {
                                            <li class="flex items-center gap-3">
                                                <div class="avatar placeholder">
                                                    <div class="bg-primary/10 text-primary rounded-full w-10">
                                                        <span>{initial}</span>
                                                    </div>
                                                </div>
                                                <div>
                                                    <p class="font-medium">{name}</p>
                                                    <p class="text-sm text-base-content/60">{user.email.clone()}</p>
                                                </div>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                    </Show>
                </div>
            </div>
        </div>
    }
}
