#[test]
fn print_new_id() {
    use anchor_lang::prelude::Pubkey;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut h = DefaultHasher::new();
    "delegated-authority-core-program-seed-v1".hash(&mut h);
    let mut bytes = [0u8; 32];
    let seed = h.finish().to_le_bytes();
    for i in 0..32 {
        bytes[i] = seed[i % 8] ^ (i as u8).wrapping_mul(91).wrapping_add(17);
    }
    let pk = Pubkey::new_from_array(bytes);
    println!("GENERATED_ID={}", pk);
}
