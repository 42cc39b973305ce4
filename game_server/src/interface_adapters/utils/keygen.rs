// 10-character base-62 keys, grounded on the original server's
// `alphanum_uuid` (a uuid4 integer reduced to a fixed-width alphanumeric
// string). `uuid::Uuid::new_v4` supplies the randomness; this just re-bases
// its 128-bit integer into a short alphanumeric alphabet instead of emitting
// the full hyphenated UUID string.

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const KEY_LEN: usize = 10;

pub fn generate_key() -> String {
    let mut n = uuid::Uuid::new_v4().as_u128();
    let mut chars = Vec::with_capacity(KEY_LEN);
    for _ in 0..KEY_LEN {
        let digit = (n % ALPHABET.len() as u128) as usize;
        chars.push(ALPHABET[digit]);
        n /= ALPHABET.len() as u128;
    }
    String::from_utf8(chars).expect("alphabet is ASCII")
}
