//! Autolink recognition: `<scheme:...>` URI autolinks and `<user@host>`
//! email autolinks, per the CommonMark grammar's fixed scheme allowlist.
//!
//! The allowlist below is the IANA-registered-scheme set the reference
//! grammar embeds; it is matched case-insensitively against the text right
//! after `<`.

use crate::ctype::{isalnum, isalpha};

pub enum AutolinkType {
    Uri,
    Email,
}

static URI_SCHEMES: phf::Set<&'static str> = phf::phf_set! {
    "coap", "doi", "javascript", "aaa", "aaas", "about", "acap", "cap", "cid",
    "crid", "data", "dav", "dict", "dns", "file", "ftp", "geo", "go", "gopher",
    "h323", "http", "https", "iax", "icap", "im", "imap", "info", "ipp",
    "iris", "iris.beep", "iris.xpc", "iris.xpcs", "iris.lwz", "ldap",
    "mailto", "mid", "msrp", "msrps", "mtqp", "mupdate", "news", "nfs", "ni",
    "nih", "nntp", "opaquelocktoken", "pop", "pres", "rtsp", "service",
    "session", "shttp", "sieve", "sip", "sips", "sms", "snmp", "soap.beep",
    "soap.beeps", "tag", "tel", "telnet", "tftp", "thismessage", "tn3270",
    "tip", "tv", "urn", "vemmi", "ws", "wss", "xcon", "xcon-userid",
    "xmlrpc.beep", "xmlrpc.beeps", "xmpp", "z39.50r", "z39.50s", "adiumxtra",
    "afp", "afs", "aim", "apt", "attachment", "aw", "beshare", "bitcoin",
    "bolo", "callto", "chrome", "chrome-extension", "com-eventbrite-attendee",
    "content", "cvs", "dlna-playsingle", "dlna-playcontainer", "dtn", "dvb",
    "ed2k", "facetime", "feed", "finger", "fish", "gg", "git", "gizmoproject",
    "gtalk", "hcp", "icon", "ipn", "irc", "irc6", "ircs", "itms", "jar",
    "jms", "keyparc", "lastfm", "ldaps", "magnet", "maps", "market",
    "message", "mms", "ms-help", "msnim", "mumble", "mvn", "notes", "oid",
    "palm", "paparazzi", "platform", "proxy", "psyc", "query", "res",
    "resource", "rmi", "rsync", "rtmp", "secondlife", "sftp", "sgn", "skype",
    "smb", "soldat", "spotify", "ssh", "steam", "svn", "teamspeak", "things",
    "udp", "unreal", "ut2004", "ventrilo", "view-source", "webcal", "wtai",
    "wyciwyg", "xfire", "xri", "ymsgr",
};

/// Try to match a URI autolink starting at `text[0]` (which must be `<`).
/// Returns the scheme+path text (without the brackets) and the number of
/// bytes of `text` consumed, including both brackets.
pub fn scan_uri(text: &str) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }

    let mut i = 1;
    let scheme_start = i;
    if i >= bytes.len() || !isalpha(bytes[i]) {
        return None;
    }
    i += 1;
    while i < bytes.len() && (isalnum(bytes[i]) || matches!(bytes[i], b'+' | b'.' | b'-')) {
        i += 1;
    }
    let scheme_len = i - scheme_start;
    if !(2..=32).contains(&scheme_len) {
        return None;
    }
    if bytes.get(i) != Some(&b':') {
        return None;
    }
    if !URI_SCHEMES.contains(text[scheme_start..i].to_ascii_lowercase().as_str()) {
        return None;
    }
    i += 1;

    while i < bytes.len() && bytes[i] != b'<' && bytes[i] != b'>' && !bytes[i].is_ascii_control() {
        i += 1;
    }
    if bytes.get(i) != Some(&b'>') {
        return None;
    }

    Some((&text[1..i], i + 1))
}

/// Try to match an email autolink starting at `text[0]` (which must be
/// `<`). Returns the address text and the number of bytes consumed.
pub fn scan_email(text: &str) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }

    let mut i = 1;
    let local_start = i;
    while i < bytes.len() && is_email_local_byte(bytes[i]) {
        i += 1;
    }
    if i == local_start || bytes.get(i) != Some(&b'@') {
        return None;
    }
    i += 1;

    if !scan_domain_label(bytes, &mut i) {
        return None;
    }
    while bytes.get(i) == Some(&b'.') {
        let save = i;
        i += 1;
        if !scan_domain_label(bytes, &mut i) {
            i = save;
            break;
        }
    }

    if bytes.get(i) != Some(&b'>') {
        return None;
    }

    Some((&text[1..i], i + 1))
}

fn is_email_local_byte(b: u8) -> bool {
    isalnum(b)
        || matches!(
            b,
            b'.' | b'!'
                | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'/'
                | b'='
                | b'?'
                | b'^'
                | b'_'
                | b'`'
                | b'{'
                | b'|'
                | b'}'
                | b'~'
                | b'-'
        )
}

/// One DNS label: alphanumeric, optionally with interior hyphens, 1-63
/// bytes. Advances `i` past the label on success.
fn scan_domain_label(bytes: &[u8], i: &mut usize) -> bool {
    let start = *i;
    if *i >= bytes.len() || !isalnum(bytes[*i]) {
        return false;
    }
    *i += 1;
    while *i < bytes.len() && (isalnum(bytes[*i]) || bytes[*i] == b'-') {
        *i += 1;
    }
    while bytes[*i - 1] == b'-' {
        *i -= 1;
    }
    *i > start && *i - start <= 63
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_scheme() {
        let (dest, used) = scan_uri("<http://example.com/a?b=c>rest").unwrap();
        assert_eq!(dest, "http://example.com/a?b=c");
        assert_eq!(used, "<http://example.com/a?b=c>".len());
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert!(scan_uri("<totallymadeup://x>").is_none());
    }

    #[test]
    fn matches_email_address() {
        let (addr, used) = scan_email("<foo@bar.example.com>rest").unwrap();
        assert_eq!(addr, "foo@bar.example.com");
        assert_eq!(used, "<foo@bar.example.com>".len());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(scan_email("<@bar.com>").is_none());
        assert!(scan_email("<foo@->").is_none());
    }
}
