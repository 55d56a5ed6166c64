//! 客户端 IP 提取（登录限流使用）
//!
//! 只有当连接来自 `api.trusted_proxies` 中的地址时才信任 X-Forwarded-For，
//! 否则一律使用对端地址，防止伪造请求头绕过限流。

use std::net::{IpAddr, SocketAddr};

use actix_web::dev::ConnectionInfo;
use tracing::debug;

fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.parse::<SocketAddr>()
        .map(|s| s.ip())
        .or_else(|_| raw.parse::<IpAddr>())
        .ok()
}

/// 检查 IP 是否在可信代理列表中（支持单个 IP 和 CIDR）
pub fn is_trusted_proxy(ip: &str, trusted_proxies: &[String]) -> bool {
    let Some(ip_addr) = parse_ip(ip) else {
        return false;
    };

    trusted_proxies.iter().any(|proxy| {
        if proxy.contains('/') {
            ip_in_cidr(&ip_addr, proxy)
        } else {
            proxy.parse::<IpAddr>().is_ok_and(|p| p == ip_addr)
        }
    })
}

/// CIDR 检查
pub fn ip_in_cidr(ip: &IpAddr, cidr: &str) -> bool {
    let Some((network, prefix_len)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(prefix_len) = prefix_len.parse::<u32>() else {
        return false;
    };
    let Ok(network) = network.parse::<IpAddr>() else {
        return false;
    };

    match (ip, network) {
        (IpAddr::V4(ip), IpAddr::V4(net)) if prefix_len <= 32 => {
            let mask = u32::MAX.checked_shl(32 - prefix_len).unwrap_or(0);
            (u32::from(*ip) & mask) == (u32::from(net) & mask)
        }
        (IpAddr::V6(ip), IpAddr::V6(net)) if prefix_len <= 128 => {
            let mask = u128::MAX.checked_shl(128 - prefix_len).unwrap_or(0);
            (u128::from(*ip) & mask) == (u128::from(net) & mask)
        }
        _ => false,
    }
}

/// 从连接信息中取出客户端 IP
///
/// `forwarded` 是 X-Forwarded-For 第一个地址（或 X-Real-IP），仅在对端是可信代理时采用。
pub fn client_ip(
    conn_info: &ConnectionInfo,
    forwarded: Option<&str>,
    trusted_proxies: &[String],
) -> Option<String> {
    let peer = conn_info.peer_addr()?;
    let peer_ip = parse_ip(peer).map(|ip| ip.to_string()).unwrap_or_else(|| peer.to_string());

    if !trusted_proxies.is_empty() && is_trusted_proxy(peer, trusted_proxies) {
        let real = forwarded
            .and_then(|f| f.split(',').next())
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| peer_ip.clone());
        debug!("Trusted proxy {} -> {}", peer_ip, real);
        return Some(real);
    }

    Some(peer_ip)
}
