use std::{net::TcpListener, sync::Arc};

use actix_web::{dev::Server, error::{JsonPayloadError, PathError, QueryPayloadError}, web, App, HttpRequest, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{auth::jwt::Tokenizer, configuration::Settings, db_interaction::AppContext, error::ApiError, routes::*, store::DocumentStore};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    // Port 0 binds a random free port, the bound one is kept in `port`
    pub fn build(settings: Settings, store: Arc<dyn DocumentStore>) -> Result<Self, anyhow::Error>{
        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))?;
        let port = listener.local_addr()?.port();

        let context = web::Data::new(AppContext::new(store, settings.application.update_mode));
        let tokenizer = web::Data::new(Tokenizer::new(&settings.jwt));

        let server = run(listener, context, tokenizer)?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn json_error(error: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(error.to_string()).into()
}

fn query_error(error: QueryPayloadError, _: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(error.to_string()).into()
}

fn path_error(error: PathError, _: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(error.to_string()).into()
}

fn run(
    listener: TcpListener,
    context: web::Data<AppContext>,
    tokenizer: web::Data<Tokenizer>
) -> Result<Server, anyhow::Error>{
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .app_data(context.clone())
            .app_data(tokenizer.clone())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/users")
                    .route("/signup", web::post().to(post_signup))
                    .route("/login", web::post().to(post_login))
                    .route("", web::get().to(get_users))
                    .route("/{user_id}", web::get().to(get_user_by_id))
                    .route("/{user_id}", web::patch().to(patch_user))
            )
            .service(
                web::scope("/menus")
                    .route("", web::get().to(get_menus))
                    .route("", web::post().to(post_menu))
                    .route("/{menu_id}", web::get().to(get_menu_by_id))
                    .route("/{menu_id}", web::patch().to(patch_menu))
            )
            .service(
                web::scope("/foods")
                    .route("", web::get().to(get_foods))
                    .route("", web::post().to(post_food))
                    .route("/{food_id}", web::get().to(get_food_by_id))
                    .route("/{food_id}", web::patch().to(patch_food))
            )
            .service(
                web::scope("/tables")
                    .route("", web::get().to(get_tables))
                    .route("", web::post().to(post_table))
                    .route("/{table_id}", web::get().to(get_table_by_id))
                    .route("/{table_id}", web::patch().to(patch_table))
            )
            .service(
                web::scope("/orders")
                    .route("", web::get().to(get_orders))
                    .route("", web::post().to(post_order))
                    .route("/{order_id}", web::get().to(get_order_by_id))
                    .route("/{order_id}", web::patch().to(patch_order))
            )
            .route("/orderItems-order/{order_id}", web::get().to(get_order_items_by_order))
            .service(
                web::scope("/orderItems")
                    .route("", web::get().to(get_order_items))
                    .route("", web::post().to(post_order_items))
                    .route("/{order_item_id}", web::get().to(get_order_item_by_id))
                    .route("/{order_item_id}", web::patch().to(patch_order_item))
            )
            .service(
                web::scope("/invoices")
                    .route("", web::get().to(get_invoices))
                    .route("", web::post().to(post_invoice))
                    .route("/{invoice_id}", web::get().to(get_invoice_by_id))
                    .route("/{invoice_id}", web::patch().to(patch_invoice))
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
