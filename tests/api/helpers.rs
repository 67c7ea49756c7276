use std::sync::Arc;

use fake::{faker::{internet::en::SafeEmail, name::en::{FirstName, LastName}}, Fake};
use once_cell::sync::Lazy;
use restaurant::{configuration::{Settings, StoreBackend}, startup::Application, store::{InsertAck, MemoryStore}, telemetry::{get_subscriber, init_subscriber}};
use serde::Serialize;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "restaurant-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub api_client: reqwest::Client
}

pub struct TestUser{
    pub email: String,
    pub phone: String,
    pub password: String
}

impl TestUser {
    pub fn generate() -> Self {
        Self{
            email: SafeEmail().fake(),
            phone: format!("98{}", (10_000_000..99_999_999u32).fake::<u32>()),
            password: "correct horse".to_string()
        }
    }

    pub fn signup_body(&self) -> serde_json::Value {
        serde_json::json!({
            "first_name": FirstName().fake::<String>() + "a",
            "last_name": LastName().fake::<String>() + "a",
            "email": self.email,
            "phone": self.phone,
            "password": self.password
        })
    }
}

impl TestApp {
    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.application.port = 0;
        settings.database.backend = StoreBackend::Memory;

        let application = Application::build(settings, Arc::new(MemoryStore::new()))
                            .expect("Failed to build application");

        let host = application.host.clone();
        let port = application.port;
        tokio::task::spawn(application.run_until_stopped());

        TestApp{
            host,
            port,
            api_client: reqwest::Client::new()
        }
    }

    pub async fn post_signup(&self, body: &serde_json::Value) -> reqwest::Response{
        self.api_client
            .post(format!("{}/users/signup", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to signup endpoint")
    }

    pub async fn post_login(&self, email: &str, password: &str) -> reqwest::Response{
        self.api_client
            .post(format!("{}/users/login", self.get_app_url()))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to send request to login endpoint")
    }

    // Signs up a fresh user and returns its access token
    pub async fn create_user_and_login(&self) -> String{
        let user = TestUser::generate();
        let response = self.post_signup(&user.signup_body()).await;
        assert_eq!(response.status().as_u16(), 200);

        let body: serde_json::Value = self.post_login(&user.email, &user.password)
            .await
            .json()
            .await
            .expect("Login did not return json");

        body["token"].as_str().expect("Login returned no token").to_string()
    }

    pub async fn get(&self, path: &str, token: &str) -> reqwest::Response{
        self.api_client
            .get(format!("{}{}", self.get_app_url(), path))
            .header("token", token)
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn post<T: Serialize>(&self, path: &str, token: &str, body: &T) -> reqwest::Response{
        self.api_client
            .post(format!("{}{}", self.get_app_url(), path))
            .header("token", token)
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request")
    }

    pub async fn patch<T: Serialize>(&self, path: &str, token: &str, body: &T) -> reqwest::Response{
        self.api_client
            .patch(format!("{}{}", self.get_app_url(), path))
            .header("token", token)
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request")
    }

    // POST that must succeed with an insert acknowledgement
    pub async fn create(&self, path: &str, token: &str, body: &serde_json::Value) -> String{
        let response = self.post(path, token, body).await;
        assert_eq!(response.status().as_u16(), 200, "creating {} failed", path);

        let ack: InsertAck = response.json().await.expect("No insert acknowledgement");
        ack.inserted_id
    }

    pub async fn create_menu(&self, token: &str) -> String{
        self.create("/menus", token, &serde_json::json!({
            "name": "Dinner",
            "category": "Mains"
        }))
        .await
    }

    pub async fn create_food(&self, token: &str, menu_id: &str, name: &str, price: f64) -> String{
        self.create("/foods", token, &serde_json::json!({
            "name": name,
            "price": price,
            "food_image": "https://img.example/food.png",
            "menu_id": menu_id
        }))
        .await
    }

    pub async fn create_table(&self, token: &str, table_number: i32) -> String{
        self.create("/tables", token, &serde_json::json!({
            "number_of_guests": 4,
            "table_number": table_number
        }))
        .await
    }
}
