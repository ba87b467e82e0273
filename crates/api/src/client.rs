use crate::auth::AuthApi;
use crate::content::{CategoriesApi, PostsApi};
use crate::errors::ApiError;
use crate::files::FilesApi;
use crate::http::HttpClient;
use crate::picker::ResourcePicker;
use crate::upload::UploadClient;
use crate::users::UsersApi;
use quill_cache::QueryCache;
use quill_config::{Config, UploadSettings};
use quill_events::EventBus;
use quill_resolver::UrlNormalizer;
use quill_session::Session;
use std::sync::Arc;

/// Everything the admin front-end talks to, wired from one config
pub struct AdminClient {
    http: Arc<HttpClient>,
    auth: AuthApi,
    users: UsersApi,
    files: Arc<FilesApi>,
    posts: PostsApi,
    categories: CategoriesApi,
    uploads: UploadClient,
    picker: ResourcePicker,
    normalizer: Arc<UrlNormalizer>,
    upload_settings: UploadSettings,
}

impl AdminClient {
    pub fn new(config: &Config, session: Arc<Session>, events: Arc<EventBus>) -> Result<Self, ApiError> {
        let http = Arc::new(HttpClient::new(&config.api, session, Arc::clone(&events))?);
        let normalizer = Arc::new(UrlNormalizer::from_config(config));
        let files_cache = Arc::new(QueryCache::new(&config.cache, Arc::clone(&events)));
        let posts_cache = Arc::new(QueryCache::new(&config.cache, Arc::clone(&events)));
        let categories_cache = Arc::new(QueryCache::new(&config.cache, events));

        let files = Arc::new(FilesApi::new(Arc::clone(&http), files_cache));
        let uploads = UploadClient::new(Arc::clone(&http), Arc::clone(&files), Arc::clone(&normalizer));
        let picker = ResourcePicker::new(Arc::clone(&files), Arc::clone(&normalizer), config.picker.page_size);

        Ok(Self {
            auth: AuthApi::new(Arc::clone(&http)),
            users: UsersApi::new(Arc::clone(&http)),
            posts: PostsApi::new(Arc::clone(&http), posts_cache),
            categories: CategoriesApi::new(Arc::clone(&http), categories_cache),
            http,
            files,
            uploads,
            picker,
            normalizer,
            upload_settings: config.upload.clone(),
        })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &Arc<Session> {
        self.http.session()
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    pub fn files(&self) -> &FilesApi {
        &self.files
    }

    pub fn posts(&self) -> &PostsApi {
        &self.posts
    }

    pub fn categories(&self) -> &CategoriesApi {
        &self.categories
    }

    pub fn uploads(&self) -> &UploadClient {
        &self.uploads
    }

    pub fn picker(&self) -> &ResourcePicker {
        &self.picker
    }

    pub fn normalizer(&self) -> &UrlNormalizer {
        &self.normalizer
    }

    pub fn upload_settings(&self) -> &UploadSettings {
        &self.upload_settings
    }
}
