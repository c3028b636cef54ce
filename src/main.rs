use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use emlak_client::api::{ImageFile, NewListing};
use emlak_client::format::{format_area, format_currency, format_phone_number, property_summary};
use emlak_client::models::{LoginRequest, Profile, Property, PropertyForm, RegisterRequest, Role};
use emlak_client::search::SearchField;
use emlak_client::session::FileStore;
use emlak_client::validate::{validate_login, validate_registration, FormErrors};
use emlak_client::{
    ApiClient, ApiError, AuthSession, Config, Navigator, PropertySearch, Route, RouteState,
    SearchParams,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "emlak")]
#[command(about = "Browse, search and manage real-estate listings")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides EMLAK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create an account
    Register(RegisterArgs),

    /// Filter and sort all listings locally
    Search(SearchArgs),

    /// Show one listing
    Show { id: i64 },

    /// Listings created by the signed-in user
    Mine,

    /// Profile details and own listings
    Profile,

    /// Publish a new listing
    Create {
        #[command(flatten)]
        fields: PropertyFields,

        /// Owner's user id; defaults to yourself for customer accounts
        #[arg(long)]
        owner_id: Option<i64>,

        /// Pick the owner by searching customers (first match wins)
        #[arg(long, conflicts_with = "owner_id")]
        owner: Option<String>,

        /// Image files to upload
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },

    /// Edit a listing; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: PropertyFields,
    },

    /// Remove a listing
    Delete { id: i64 },

    /// List customers, or search them by name
    Customers {
        #[arg(short, long)]
        query: Option<String>,
    },
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
    /// CUSTOMER or BUSINESS (labels accepted)
    #[arg(long)]
    role: Option<String>,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    business_name: String,
    #[arg(long, default_value = "")]
    authorized_person: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
}

#[derive(Args)]
struct SearchArgs {
    #[arg(long = "type")]
    property_type: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    heating: Option<String>,
    #[arg(long)]
    rooms: Option<String>,
    #[arg(long)]
    floor: Option<String>,
    #[arg(long)]
    min_price: Option<String>,
    #[arg(long)]
    max_price: Option<String>,
    #[arg(long)]
    min_area: Option<String>,
    #[arg(long)]
    max_area: Option<String>,
    #[arg(long)]
    address: Option<String>,
    /// priceAsc or priceDesc
    #[arg(long, default_value = "priceAsc")]
    sort: String,
}

#[derive(Args)]
struct PropertyFields {
    /// Property type code or label (e.g. APARTMENT, Daire)
    #[arg(long = "type")]
    property_type: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    heating: Option<String>,
    /// Room layout label or code (e.g. 3+1)
    #[arg(long)]
    rooms: Option<String>,
    #[arg(long)]
    floor: Option<String>,
    #[arg(long)]
    area: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl PropertyFields {
    fn apply(self, form: &mut PropertyForm) {
        let pairs = [
            (self.property_type, &mut form.property_type),
            (self.status, &mut form.property_status),
            (self.heating, &mut form.heating_type),
            (self.rooms, &mut form.number_of_rooms),
            (self.floor, &mut form.floor),
            (self.area, &mut form.area),
            (self.price, &mut form.price),
            (self.address, &mut form.address),
            (self.description, &mut form.description),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

struct App {
    api: Arc<ApiClient>,
    session: Arc<AuthSession>,
    routes: Arc<RouteState>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            match e.downcast_ref::<ApiError>() {
                Some(api_error) => eprintln!("{}", api_error.user_message()),
                None => eprintln!("Bir şeyler ters gitti. Lütfen tekrar deneyin."),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load();
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }

    let store = Arc::new(FileStore::new(&config.session_file));
    let session = Arc::new(AuthSession::new(store));
    let routes = Arc::new(RouteState::new(Route::Home));
    let api = Arc::new(
        ApiClient::new(&config, session.clone(), routes.clone())
            .context("Failed to create HTTP client")?,
    );
    info!("Using backend at {}", api.base_url());

    let app = App {
        api,
        session,
        routes,
    };

    let signing_in = matches!(cli.command, Commands::Login { .. });
    let result = app.dispatch(cli.command).await;

    if !signing_in && app.routes.current() == Route::Login {
        eprintln!("Oturum sonlandı. Devam etmek için `emlak login` ile giriş yapın.");
    }

    result
}

impl App {
    async fn dispatch(&self, command: Commands) -> Result<ExitCode> {
        match command {
            Commands::Login { email, password } => self.login(email, password).await,
            Commands::Logout => {
                self.session.logout();
                println!("Çıkış yapıldı.");
                Ok(ExitCode::SUCCESS)
            }
            Commands::Whoami => {
                match self.session.current() {
                    Some(user) => println!("{} ({}, #{})", user.email, user.role.label(), user.id),
                    None => println!("Giriş yapılmadı."),
                }
                Ok(ExitCode::SUCCESS)
            }
            Commands::Register(args) => self.register(args).await,
            Commands::Search(args) => self.search(args).await,
            Commands::Show { id } => {
                let property = self.api.get_property(id).await?;
                print_details(&property);
                Ok(ExitCode::SUCCESS)
            }
            Commands::Mine => {
                self.require_login()?;
                let properties = self.api.my_properties().await?;
                print_list(&properties, "Henüz ilanınız yok.");
                Ok(ExitCode::SUCCESS)
            }
            Commands::Profile => self.profile().await,
            Commands::Create {
                fields,
                owner_id,
                owner,
                images,
            } => self.create(fields, owner_id, owner, images).await,
            Commands::Update { id, fields } => self.update(id, fields).await,
            Commands::Delete { id } => {
                self.require_login()?;
                self.api.delete_property(id).await?;
                println!("İlan #{id} silindi.");
                Ok(ExitCode::SUCCESS)
            }
            Commands::Customers { query } => {
                let customers = match query {
                    Some(query) => self.api.search_customers(&query).await?,
                    None => self.api.list_customers().await?,
                };
                for customer in &customers {
                    println!(
                        "#{} {} {}",
                        customer.id,
                        customer.full_name(),
                        customer.email().unwrap_or("-")
                    );
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn require_login(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            self.routes.navigate(Route::Login);
            bail!("this command needs a signed-in session");
        }
        Ok(())
    }

    async fn login(&self, email: String, password: String) -> Result<ExitCode> {
        let errors = validate_login(&email, &password);
        if !errors.is_empty() {
            print_form_errors(&errors);
            return Ok(ExitCode::from(2));
        }

        let user = match self
            .session
            .login(&self.api, &LoginRequest { email, password })
            .await
        {
            Ok(user) => user,
            Err(ApiError::Unauthorized(message)) => {
                eprintln!("Giriş başarısız: {message}");
                return Ok(ExitCode::from(2));
            }
            Err(e) => return Err(e.into()),
        };
        self.routes.navigate(Route::Home);
        println!("Hoş geldiniz, {}!", user.email);
        Ok(ExitCode::SUCCESS)
    }

    async fn register(&self, args: RegisterArgs) -> Result<ExitCode> {
        let role = match args.role.as_deref() {
            Some(raw) => Some(raw.parse::<Role>()?),
            None => None,
        };
        let request = RegisterRequest {
            email: args.email,
            password: args.password,
            confirm_password: args.confirm_password,
            role,
            first_name: args.first_name,
            last_name: args.last_name,
            business_name: args.business_name,
            authorized_person: args.authorized_person,
            phone_number: args.phone,
            address: args.address,
        };

        let errors = validate_registration(&request);
        if !errors.is_empty() {
            print_form_errors(&errors);
            return Ok(ExitCode::from(2));
        }

        match self.api.register(&request).await {
            Ok(message) => {
                info!("Registration accepted: {}", message);
                println!("Kayıt başarılı! Şimdi giriş yapabilirsiniz.");
                Ok(ExitCode::SUCCESS)
            }
            Err(ApiError::Status { message, .. }) => {
                let message = if message.is_empty() {
                    "Kayıt sırasında bir hata oluştu!".to_string()
                } else {
                    message
                };
                eprintln!("{message}");
                Ok(ExitCode::from(2))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn search(&self, args: SearchArgs) -> Result<ExitCode> {
        let mut params = SearchParams::default();
        let inputs = [
            (SearchField::PropertyType, args.property_type),
            (SearchField::PropertyStatus, args.status),
            (SearchField::HeatingType, args.heating),
            (SearchField::NumberOfRooms, args.rooms),
            (SearchField::Floor, args.floor),
            (SearchField::MinPrice, args.min_price),
            (SearchField::MaxPrice, args.max_price),
            (SearchField::MinArea, args.min_area),
            (SearchField::MaxArea, args.max_area),
            (SearchField::Address, args.address),
            (SearchField::SortBy, Some(args.sort)),
        ];
        for (field, value) in inputs {
            if let Some(value) = value {
                if !params.set(field, &value) {
                    warn!("Ignoring {:?} value {:?}", field, value);
                }
            }
        }

        let mut search = PropertySearch::new(self.api.clone());
        search.load().await?;

        let results = search.results(&params);
        info!("{} listings match", results.len());
        print_list(&results, "Arama sonucunda emlak bulunamadı.");
        Ok(ExitCode::SUCCESS)
    }

    async fn profile(&self) -> Result<ExitCode> {
        let Some(user) = self.session.current() else {
            self.routes.navigate(Route::Login);
            bail!("this command needs a signed-in session");
        };

        let (profile, properties) = tokio::join!(self.api.profile(&user), self.api.my_properties());

        println!("{} ({})", user.email, user.role.label());
        match profile {
            Ok(Profile::Customer(c)) => {
                println!("Ad Soyad: {}", c.full_name());
                println!(
                    "Telefon: {}",
                    format_phone_number(c.phone_number.as_deref().unwrap_or(""))
                );
                println!("Adres: {}", c.address.as_deref().unwrap_or("-"));
            }
            Ok(Profile::Business(b)) => {
                println!("İşletme: {}", b.business_name);
                println!("Yetkili: {} {}", b.first_name, b.last_name);
                println!(
                    "Telefon: {}",
                    format_phone_number(b.phone_number.as_deref().unwrap_or(""))
                );
                println!("Adres: {}", b.address.as_deref().unwrap_or("-"));
            }
            Err(e) if e.is_unauthorized() => return Err(e.into()),
            Err(e) => {
                warn!("Failed to load profile: {}", e);
                println!("Profil bilgileri yüklenemedi.");
            }
        }

        println!();
        match properties {
            Ok(properties) => print_list(&properties, "Henüz ilanınız yok."),
            Err(e) if e.is_unauthorized() => return Err(e.into()),
            Err(e) => warn!("Failed to load own listings: {}", e),
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn create(
        &self,
        fields: PropertyFields,
        owner_id: Option<i64>,
        owner: Option<String>,
        images: Vec<PathBuf>,
    ) -> Result<ExitCode> {
        let Some(user) = self.session.current() else {
            self.routes.navigate(Route::Login);
            bail!("Lütfen giriş yapın.");
        };

        let mut form = PropertyForm::default();
        fields.apply(&mut form);
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => {
                print_form_errors(&errors);
                return Ok(ExitCode::from(2));
            }
        };

        let owner_id = match (owner_id, owner) {
            (Some(id), _) => id,
            (None, Some(query)) => {
                let candidates = self.api.find_owner_candidates(&query).await?;
                let Some(first) = candidates.first() else {
                    eprintln!("'{query}' için müşteri bulunamadı.");
                    return Ok(ExitCode::from(2));
                };
                println!("Mülk sahibi: {} (#{})", first.full_name(), first.id);
                first.id
            }
            (None, None) if user.role == Role::Customer => user.id,
            (None, None) => {
                eprintln!("Lütfen bir mülk sahibi seçin.");
                return Ok(ExitCode::from(2));
            }
        };

        let mut files = Vec::with_capacity(images.len());
        for path in &images {
            files.push(ImageFile::from_path(path).await?);
        }

        let listing = NewListing {
            draft,
            owner_id,
            lister_id: user.id,
            images: files,
        };
        let property = self.api.create_property(&listing).await?;

        println!("Emlak başarıyla kaydedildi! (#{})", property.id);
        Ok(ExitCode::SUCCESS)
    }

    async fn update(&self, id: i64, fields: PropertyFields) -> Result<ExitCode> {
        self.require_login()?;

        let existing = self.api.get_property(id).await?;
        let mut form = PropertyForm::from_property(&existing);
        fields.apply(&mut form);

        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => {
                print_form_errors(&errors);
                return Ok(ExitCode::from(2));
            }
        };

        let updated = self.api.update_property(id, &draft).await?;
        println!("İlan güncellendi.");
        print_details(&updated);
        Ok(ExitCode::SUCCESS)
    }
}

fn print_list(properties: &[Property], empty_message: &str) {
    if properties.is_empty() {
        println!("{empty_message}");
        return;
    }
    for (i, property) in properties.iter().enumerate() {
        println!("{}. {}", i + 1, property_summary(property));
        println!("   ID: {}", property.id);
    }
}

fn print_details(property: &Property) {
    println!(
        "{} - {}",
        property.property_type.label(),
        property.property_status.label()
    );
    println!("   Adres: {}", property.address.as_deref().unwrap_or("-"));
    println!("   Fiyat: {}", format_currency(Some(property.price)));
    println!("   Alan: {}", format_area(Some(property.area)));
    println!("   Oda: {}, Kat: {}", property.number_of_rooms.label(), property.floor);
    println!("   Isıtma: {}", property.heating_type.label());
    if !property.description.is_empty() {
        println!("   Açıklama: {}", property.description);
    }
    if let Some(owner) = &property.owner_name {
        println!("   Sahibi: {}", owner);
    }
    if !property.image_urls.is_empty() {
        println!("   Görseller: {}", property.image_urls.join(", "));
    }
}

fn print_form_errors(errors: &FormErrors) {
    for (field, message) in errors {
        eprintln!("{field}: {message}");
    }
}
