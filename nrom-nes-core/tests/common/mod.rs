use nrom_nes_core::Byte;

const PRG_SIZE: usize = 2 * 16384;
const CHR_SIZE: usize = 8192;

/// Two PRG banks holding `program` at $8000 with reset, NMI and IRQ vectors
/// all pointing there, followed by one blank CHR bank.
pub fn ines_image(program: &[Byte]) -> Vec<Byte> {
    ines_image_with_nmi(program, 0x8000)
}

#[allow(unused)]
pub fn ines_image_with_nmi(program: &[Byte], nmi_handler: u16) -> Vec<Byte> {
    let mut image = vec![b'N', b'E', b'S', 0x1a, 2, 1, 0x01, 0x00];
    image.resize(16, 0);

    let mut prg = vec![0xea; PRG_SIZE];
    prg[..program.len()].copy_from_slice(program);
    let [nmi_lo, nmi_hi] = nmi_handler.to_le_bytes();
    prg[PRG_SIZE - 6..].copy_from_slice(&[nmi_lo, nmi_hi, 0x00, 0x80, 0x00, 0x80]);

    image.extend(prg);
    image.extend(vec![0; CHR_SIZE]);
    image
}
