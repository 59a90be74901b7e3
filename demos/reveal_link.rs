//! Example of building both link flavors and verifying the token round trip

use mailcloak::{Codec, LinkBuilder, LinkConfig};

fn main() -> anyhow::Result<()> {
    println!("=== mailcloak Example ===\n");

    let config = LinkConfig {
        email: "hello@example.com".to_string(),
        subject: "Saying hi".to_string(),
        message: "Line one\nLine two".to_string(),
        label: "Email me".to_string(),
        encrypt: true,
    };

    // Encrypted flavor: the address lives only inside the token
    let builder = LinkBuilder::new();
    let encrypted = builder.build(&config)?;
    println!("Encrypted link:");
    println!("{}\n", encrypted);

    // Plain flavor: address split across editable data attributes
    let plain = builder.build(&LinkConfig {
        encrypt: false,
        ..config.clone()
    })?;
    println!("Plain link:");
    println!("{}\n", plain);

    // Verify the embedded token decodes back to the full mailto URL
    let codec = Codec::new();
    let start = encrypted.find("(\"").map(|i| i + 2).unwrap_or(0);
    let end = encrypted.find("\")").unwrap_or(encrypted.len());
    let token = &encrypted[start..end];
    let url = codec.decode(token)?;

    println!("Token:   {}", token);
    println!("Decodes: {}", url);
    assert!(url.starts_with("mailto:hello@example.com"));

    // Same text encodes differently per call: the base is randomized
    let a = codec.encode("hello@example.com")?;
    let b = codec.encode("hello@example.com")?;
    println!("\nTwo encodes of the same address:");
    println!("  {}", a);
    println!("  {}", b);
    assert_eq!(codec.decode(&a)?, codec.decode(&b)?);

    println!("\nRound-trip verification passed!");
    Ok(())
}
