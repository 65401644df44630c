extern crate tokio;

use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;
use log::{info, warn};
use tokio::net::UdpSocket;

// usage: mock_client [server address] [domain] [type]
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::try_init();

    let server_address = std::env::args().nth(1).unwrap_or("127.0.0.1:53".to_string());
    let server_addr = server_address.parse::<SocketAddr>()?;
    let domain = std::env::args().nth(2).unwrap_or("google.com".to_string());
    let type_arg = std::env::args().nth(3).unwrap_or("A".to_string());
    let qtype = dns::type_from_name(&type_arg).ok_or(format!("unknown query type: {}", type_arg))?;

    // 1. sends the query
    let id = std::process::id() as u16;
    let request_bytes = dns::encode_query(id, &domain, qtype)?;
    let sock = UdpSocket::bind("0.0.0.0:0").await?;
    sock.send_to(&request_bytes, server_addr).await?;
    info!("sent {} query for {} to {}, id: {}", type_arg, domain, server_addr, id);

    // 2. receives the reply
    let mut resp_buf = [0u8; dns::MAX_UDP_SIZE];
    let response_size = tokio::time::timeout(Duration::from_secs(3), sock.recv(&mut resp_buf)).await??;
    let response_bytes = &resp_buf[0..response_size];
    info!("received {} bytes: {}", response_size, dns::hex_dump(response_bytes));

    // 3. decodes it
    let resp = dns::decode_message(response_bytes)?;
    if resp.header.id != id {
        warn!("reply id {} does not match query id {}", resp.header.id, id);
    }

    println!("header: {}", resp.header);
    for q in &resp.questions {
        println!("question: {}", q);
    }
    for r in &resp.answers {
        println!("answer: {}", r);
    }
    for r in &resp.authorities {
        println!("authority: {}", r);
    }
    for r in &resp.additionals {
        println!("additional: {}", r);
    }
    if resp.is_truncated() {
        warn!("reply has more records than were decoded: {:?}", resp.overflows());
    }

    Ok(())
}
