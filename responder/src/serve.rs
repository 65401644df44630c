use bytes::BytesMut;
use dns::{hex_dump, FixedAnswer, Limits, Message, Reply, MAX_UDP_SIZE};
use tokio::net::UdpSocket;

pub struct Responder {
    limits: Limits,
    answer: FixedAnswer,
}

impl Responder {
    pub fn new(limits: Limits, answer: FixedAnswer) -> Self {
        Self { limits, answer }
    }

    /// Decodes one query and builds the reply carrying the fixed answer.
    pub fn handle_datagram(&self, request: &[u8]) -> dns::Result<Vec<u8>> {
        let msg = Message::parse(request, &self.limits)?;

        tracing::debug!("header: {}", msg.header);
        for q in &msg.questions {
            tracing::debug!("question: {}", q);
        }
        for r in msg.answers.iter().chain(&msg.authorities).chain(&msg.additionals) {
            tracing::debug!("resource: {}", r);
        }
        for o in msg.overflows() {
            tracing::warn!(
                "{} section declares {} records, only {} kept",
                o.section,
                o.declared,
                o.decoded
            );
        }

        let mut reply_bytes: Vec<u8> = Vec::with_capacity(MAX_UDP_SIZE);
        Reply::new(msg.header.id, &self.answer)
            .recursion_desired(msg.header.rd)
            .to_bytes(&mut reply_bytes)?;

        Ok(reply_bytes)
    }

    /// Receives, decodes and answers one datagram at a time until the socket
    /// fails with a non-transient error.
    pub async fn serve(&self, sock: &UdpSocket) -> std::io::Result<()> {
        // one spare byte tells an oversized datagram apart from a full one
        let mut buf = BytesMut::with_capacity(MAX_UDP_SIZE + 1);

        loop {
            buf.clear();
            let (len, peer) = match sock.recv_buf_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    if is_transient_error(&e) {
                        tracing::warn!("UDP receive error, err: {}", e);
                        continue;
                    }
                    return Err(e);
                }
            };

            if len > MAX_UDP_SIZE {
                tracing::warn!("datagram from {} too large for buffer, rejecting", peer);
                continue;
            }

            let request = &buf[..len];
            tracing::info!("received {} bytes from {}", len, peer);
            tracing::debug!("request bytes: {}", hex_dump(request));

            let reply = match self.handle_datagram(request) {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!("dropping datagram from {}, err: {}", peer, e);
                    continue;
                }
            };

            match sock.send_to(&reply, peer).await {
                Ok(sent) => {
                    tracing::info!("sent {} of {} bytes to {}", sent, reply.len(), peer);
                    tracing::debug!("reply bytes: {}", hex_dump(&reply));
                }
                Err(e) => {
                    tracing::error!("failed to send reply to {}, err: {}", peer, e);
                }
            }
        }
    }
}

// ICMP port unreachable from an earlier send surfaces on the next receive
// on some platforms.
fn is_transient_error(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::Interrupted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dns::{DnsError, TYPE_A};
    use std::net::{Ipv4Addr, SocketAddr};
    use std::time::Duration;

    fn responder() -> Responder {
        Responder::new(Limits::default(), FixedAnswer::default())
    }

    #[test]
    fn handle_query_test() {
        let query = dns::encode_query(0x1234, "google.com", TYPE_A).unwrap();

        let reply = responder().handle_datagram(&query).unwrap();

        assert_eq!(reply, dns::encode_reply(0x1234).unwrap());
    }

    #[test]
    fn echoes_recursion_desired_test() {
        let mut query = dns::encode_query(7, "example.org", TYPE_A).unwrap();
        query[2] &= !0x01;

        let reply = responder().handle_datagram(&query).unwrap();
        let header = dns::decode_header(&reply).unwrap();

        assert_eq!(header.id, 7);
        assert!(header.qr);
        assert!(!header.rd);
        assert!(header.ra);
    }

    #[test]
    fn configured_answer_test() {
        let answer = FixedAnswer::new("example.org", Ipv4Addr::new(192, 0, 2, 1), 30).unwrap();
        let responder = Responder::new(Limits::default(), answer);
        let query = dns::encode_query(1, "example.org", TYPE_A).unwrap();

        let reply = responder.handle_datagram(&query).unwrap();
        let msg = dns::decode_message(&reply).unwrap();

        assert_eq!(msg.answers[0].name.to_string(), "example.org.");
        assert_eq!(msg.answers[0].ttl, 30);
        assert_eq!(msg.answers[0].rdata, &[192, 0, 2, 1][..]);
    }

    #[test]
    fn malformed_query_test() {
        assert!(matches!(
            responder().handle_datagram(&[0x12, 0x34, 0x01]),
            Err(DnsError::MalformedHeader { len: 3 })
        ));

        let mut query = dns::encode_query(1, "google.com", TYPE_A).unwrap();
        query.truncate(query.len() - 2);
        assert!(matches!(
            responder().handle_datagram(&query),
            Err(DnsError::MalformedQuestion { .. })
        ));
    }

    async fn exchange(client: &UdpSocket, server: SocketAddr, request: &[u8]) -> Option<Vec<u8>> {
        client.send_to(request, server).await.unwrap();

        let mut buf = vec![0u8; MAX_UDP_SIZE];
        match tokio::time::timeout(Duration::from_millis(300), client.recv(&mut buf)).await {
            Ok(Ok(n)) => Some(buf[..n].to_vec()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn serve_udp_test() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = responder().serve(&server).await;
        });

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        // garbage and oversized datagrams get no reply, the loop keeps going
        assert!(exchange(&client, server_addr, &[1, 2, 3]).await.is_none());
        assert!(exchange(&client, server_addr, &[0u8; MAX_UDP_SIZE + 40]).await.is_none());

        let query = dns::encode_query(0xBEEF, "google.com", TYPE_A).unwrap();
        let reply = exchange(&client, server_addr, &query).await.unwrap();

        let msg = dns::decode_message(&reply).unwrap();
        assert_eq!(msg.header.id, 0xBEEF);
        assert!(msg.header.qr);
        assert_eq!(msg.answers.len(), 1);
        assert_eq!(msg.answers[0].rdata, &[142, 251, 16, 102][..]);
    }
}
