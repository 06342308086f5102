use crate::ai::policy::Command;
use crate::utils::TileGrid;

use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};
use log::{info, trace, warn};
use serde::Serialize;
use simple_server::{Method, Server, StatusCode};
use tungstenite::server::accept;

use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::spawn;

// Messages queued for the dashboard, and for each connected client, before
// new ones are dropped
const BACKLOG: usize = 256;

type Clients = Arc<Mutex<Vec<Sender<String>>>>;

#[derive(Clone, Debug)]
pub struct DashboardOptions {
    pub host: String,
    pub port: u16,
    pub websocket_port: u16,
    pub static_dir: PathBuf,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            websocket_port: 9000,
            static_dir: PathBuf::from("dashboard"),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
enum Message {
    UpdateGrid(TileGrid),
    Decision(Command),
}

impl Message {
    fn serialise(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(text) => Some(text),
            Err(err) => {
                warn!("Couldn't serialise dashboard message: {}", err);
                None
            }
        }
    }
}

pub struct Dashboard {
    sender: Sender<Message>,
}

impl Dashboard {
    pub fn new(options: DashboardOptions) -> Dashboard {
        let (tx, rx) = bounded(BACKLOG);
        let http_options = options.clone();
        spawn(move || Dashboard::run_http_server(http_options));
        let clients = Clients::default();
        let broadcast_clients = clients.clone();
        spawn(move || Dashboard::broadcast(rx, broadcast_clients));
        spawn(move || Dashboard::run_websockets_server(options, clients));
        Dashboard { sender: tx }
    }

    // Every connected client gets its own copy of each message. Clients that
    // have gone away are forgotten.
    fn broadcast(rx: Receiver<Message>, clients: Clients) {
        for message in rx.iter() {
            let text = match message.serialise() {
                Some(text) => text,
                None => continue,
            };
            let mut clients = match clients.lock() {
                Ok(clients) => clients,
                Err(_) => {
                    warn!("Dashboard client list poisoned, stopping");
                    return;
                }
            };
            clients.retain(|client| match client.try_send(text.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    trace!("Dashboard client is behind, dropping message");
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
            });
        }
    }

    fn run_http_server(options: DashboardOptions) {
        let index = options.static_dir.join("index.html");
        let mut server = Server::new(move |request, mut response| {
            match (request.method(), request.uri().path()) {
                (&Method::GET, "/") => match fs::read(&index) {
                    Ok(buffer) => Ok(response.body(buffer)?),
                    Err(err) => {
                        warn!("Couldn't open {}: {}", index.display(), err);
                        response.status(StatusCode::NOT_FOUND);
                        Ok(response.body(b"Error 404 - Not found".to_vec())?)
                    }
                },
                (_, _) => {
                    response.status(StatusCode::NOT_FOUND);
                    Ok(response.body(b"Error 404 - Not found".to_vec())?)
                }
            }
        });
        server.set_static_directory(options.static_dir.clone());
        info!(
            "Dashboard listening on http://{}:{}",
            options.host, options.port
        );
        let port = format!("{}", options.port);
        server.listen(&options.host, &port);
    }

    fn run_websockets_server(options: DashboardOptions, clients: Clients) {
        use tungstenite::Message::Text;
        let addr = format!("{}:{}", options.host, options.websocket_port);
        let server = match TcpListener::bind(&addr) {
            Ok(server) => server,
            Err(err) => {
                warn!("Couldn't bind dashboard websocket to {}: {}", addr, err);
                return;
            }
        };
        for stream in server.incoming() {
            let (tx, rx) = bounded::<String>(BACKLOG);
            match clients.lock() {
                Ok(mut clients) => clients.push(tx),
                Err(_) => {
                    warn!("Dashboard client list poisoned, stopping");
                    return;
                }
            }
            spawn(move || {
                let mut websocket = match stream.map_err(|err| err.to_string()).and_then(|stream| {
                    accept(stream).map_err(|err| err.to_string())
                }) {
                    Ok(websocket) => websocket,
                    Err(err) => {
                        warn!("Dashboard connection failed: {}", err);
                        return;
                    }
                };
                for text in rx.iter() {
                    if let Err(err) = websocket.write_message(Text(text)) {
                        warn!("Dashboard client went away: {}", err);
                        return;
                    }
                }
            });
        }
    }

    fn send(&self, message: Message) {
        match self.sender.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => trace!("Dashboard backlog full, dropping message"),
            Err(TrySendError::Disconnected(_)) => warn!("Dashboard is no longer running"),
        }
    }

    pub fn update_grid(&self, grid: &TileGrid) {
        self.send(Message::UpdateGrid(grid.clone()));
    }

    pub fn decision(&self, command: Command) {
        self.send(Message::Decision(command));
    }
}
