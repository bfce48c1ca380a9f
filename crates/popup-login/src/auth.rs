//! Login orchestrator
//!
//! Per attempt: `login` checks the cache, then either resolves from cache on
//! the next scheduler tick or opens the popup and waits for `finish`.
//! Callbacks always run on a later tick, never inside `login` or `finish`.
//!
//! ```text
//! Idle -> CheckingCache -> ResolvedFromCache ----------------> Done(success)
//!                       \-> AwaitingChannel --finish()-------> Done(success | failure)
//! ```
//!
//! Only one attempt is tracked. A new `login` drops the pending attempt and
//! its callback never fires; `PendingToken` futures see `Error::Superseded`.
//! There is no timeout: an abandoned popup leaves the attempt pending until
//! the next `login`.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use common::Settings;
use implicit_auth::{
    AuthRequest, Clock, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, DefaultResponseParser,
    PercentCodec, ResponseParser, SystemClock, TokenInfo, TokenStore, UrlCodec,
};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::TokenCache;
use crate::channel::{AuthorizationChannel, PopupRequest};
use crate::error::{Error, Result};
use crate::metrics;
use crate::scheduler::Scheduler;

/// Completion handler: `Ok` on the success path, `Err` on the failure path.
pub type LoginCallback = Box<dyn FnOnce(Result<TokenInfo>)>;

/// Where a `login` call left the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Cached token scheduled for delivery on the next tick
    ResolvedFromCache,
    /// Popup opened; waiting for `finish`
    AwaitingChannel { attempt: Uuid },
    /// Popup could not be opened; failure scheduled for the next tick
    ChannelFailed,
}

struct PendingLogin {
    attempt: Uuid,
    request: AuthRequest,
    parser: Box<dyn ResponseParser>,
    callback: LoginCallback,
}

/// Drives the implicit-grant token lifecycle.
///
/// Single-threaded: capabilities are shared through `Rc`, and the channel
/// reports back by calling `finish` on the same thread.
pub struct Auth {
    cache: TokenCache,
    clock: Rc<dyn Clock>,
    codec: Rc<dyn UrlCodec>,
    scheduler: Rc<dyn Scheduler>,
    channel: Rc<dyn AuthorizationChannel>,
    redirect_url: String,
    width: u32,
    height: u32,
    pending: Option<PendingLogin>,
}

impl Auth {
    /// Create an orchestrator using the system clock and percent encoding.
    ///
    /// `redirect_url` is the registered endpoint the provider redirects the
    /// popup to.
    pub fn new(
        store: Rc<dyn TokenStore>,
        scheduler: Rc<dyn Scheduler>,
        channel: Rc<dyn AuthorizationChannel>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            cache: TokenCache::new(store),
            clock: Rc::new(SystemClock),
            codec: Rc::new(PercentCodec),
            scheduler,
            channel,
            redirect_url: redirect_url.into(),
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            pending: None,
        }
    }

    /// Create an orchestrator from loaded settings.
    pub fn from_settings(
        settings: &Settings,
        store: Rc<dyn TokenStore>,
        scheduler: Rc<dyn Scheduler>,
        channel: Rc<dyn AuthorizationChannel>,
    ) -> Self {
        let mut auth = Self::new(
            Rc::clone(&store),
            scheduler,
            channel,
            settings.popup.redirect_url.clone(),
        );
        auth.cache = TokenCache::with_margin(store, settings.cache.freshness_margin_millis());
        auth.width = settings.popup.width;
        auth.height = settings.popup.height;
        auth
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_codec(mut self, codec: Rc<dyn UrlCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Set the redirect endpoint. Takes effect on the next `login`.
    pub fn set_redirect_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.redirect_url = url.into();
        self
    }

    /// Set the popup width in pixels. The default is 800.
    pub fn set_window_width(&mut self, width: u32) -> &mut Self {
        self.width = width;
        self
    }

    /// Set the popup height in pixels. The default is 600.
    pub fn set_window_height(&mut self, height: u32) -> &mut Self {
        self.height = height;
        self
    }

    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Whether a popup attempt is waiting for `finish`.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Full URL opened in the popup: the request URL plus `redirect_uri`.
    pub fn authorization_url(&self, request: &AuthRequest) -> String {
        format!(
            "{}&redirect_uri={}",
            request.to_url(self.codec.as_ref()),
            self.codec.encode(&self.redirect_url)
        )
    }

    /// Request an access token using the default fragment parser.
    ///
    /// A cached token expiring no sooner than the freshness margin is passed
    /// to `callback` on the next scheduler tick. Otherwise the popup is
    /// opened, and `callback` fires when the channel calls `finish`.
    pub fn login<F>(&mut self, request: AuthRequest, callback: F) -> LoginOutcome
    where
        F: FnOnce(Result<TokenInfo>) + 'static,
    {
        let parser = Box::new(DefaultResponseParser::new(Rc::clone(&self.clock)));
        self.login_with_parser(request, parser, callback)
    }

    /// Request an access token, parsing the redirect with `parser`.
    pub fn login_with_parser<F>(
        &mut self,
        request: AuthRequest,
        parser: Box<dyn ResponseParser>,
        callback: F,
    ) -> LoginOutcome
    where
        F: FnOnce(Result<TokenInfo>) + 'static,
    {
        let callback: LoginCallback = Box::new(callback);

        if let Some(previous) = self.pending.take() {
            warn!(
                attempt = %previous.attempt,
                client_id = previous.request.client_id(),
                "superseding pending login attempt"
            );
            metrics::record_superseded();
        }

        match self.cache.lookup(&request) {
            Some(info) if self.cache.is_fresh_enough(&info, self.clock.now()) => {
                debug!(
                    client_id = request.client_id(),
                    "cached token still fresh, resolving on next tick"
                );
                metrics::record_login("cache");
                self.scheduler.defer(Box::new(move || callback(Ok(info))));
                return LoginOutcome::ResolvedFromCache;
            }
            Some(_) => debug!(
                client_id = request.client_id(),
                "cached token expiring soon or without expiry, refreshing via popup"
            ),
            None => debug!(
                client_id = request.client_id(),
                "no cached token, authorizing via popup"
            ),
        }

        metrics::record_login("popup");
        let popup = PopupRequest {
            url: self.authorization_url(&request),
            width: self.width,
            height: self.height,
        };

        if let Err(reason) = self.channel.open(&popup) {
            warn!(
                client_id = request.client_id(),
                error = %reason,
                "authorization popup failed to open"
            );
            let result: Result<TokenInfo> = Err(Error::Channel(reason));
            metrics::record_completion(&result);
            self.scheduler.defer(Box::new(move || callback(result)));
            return LoginOutcome::ChannelFailed;
        }

        let attempt = Uuid::new_v4();
        info!(%attempt, client_id = request.client_id(), "awaiting authorization popup");
        self.pending = Some(PendingLogin {
            attempt,
            request,
            parser,
            callback,
        });
        LoginOutcome::AwaitingChannel { attempt }
    }

    /// Like `login`, but returns a future for the token.
    ///
    /// The future resolves to `Error::Superseded` if another `login` replaces
    /// this attempt before it completes.
    pub fn login_future(&mut self, request: AuthRequest) -> PendingToken {
        let (tx, rx) = oneshot::channel();
        self.login(request, move |result| {
            // Receiver dropped means the caller stopped waiting.
            let _ = tx.send(result);
        });
        PendingToken { rx }
    }

    /// Complete the pending attempt with the popup's redirect.
    ///
    /// The token is cached immediately; the callback fires on the next
    /// scheduler tick, so it may call `login` again. This only returns
    /// `Err(NoPendingLogin)` when there is no attempt to complete (e.g. a
    /// duplicate popup callback).
    pub fn finish(&mut self, fragment: &str, query: &str) -> Result<()> {
        let Some(PendingLogin {
            attempt,
            request,
            parser,
            callback,
        }) = self.pending.take()
        else {
            warn!("finish called with no pending login attempt, ignoring");
            return Err(Error::NoPendingLogin);
        };

        let result = parser
            .parse_response(fragment, query)
            .into_result(fragment)
            .map_err(Error::from);

        match &result {
            Ok(info) => {
                if let Err(e) = self.cache.store(&request, info) {
                    warn!(%attempt, error = %e, "failed to persist token");
                }
                info!(%attempt, client_id = request.client_id(), "login completed");
            }
            Err(e) => warn!(%attempt, error = %e, "login failed"),
        }

        metrics::record_completion(&result);
        self.scheduler.defer(Box::new(move || callback(result)));
        Ok(())
    }

    /// Milliseconds until the token stored for `request` expires.
    ///
    /// `-inf` when no token is stored, `+inf` when the stored token has no
    /// known expiry.
    pub fn expires_in(&self, request: &AuthRequest) -> f64 {
        self.cache.expires_in(request, self.clock.now())
    }

    /// Clear every stored token. Subsequent logins go through the popup.
    pub fn clear_all_tokens(&self) -> Result<()> {
        info!("clearing all cached tokens");
        self.cache.clear().map_err(Error::from)
    }
}

/// Future returned by `Auth::login_future`.
#[derive(Debug)]
pub struct PendingToken {
    rx: oneshot::Receiver<Result<TokenInfo>>,
}

impl Future for PendingToken {
    type Output = Result<TokenInfo>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or_else(|_| Err(Error::Superseded)))
    }
}
