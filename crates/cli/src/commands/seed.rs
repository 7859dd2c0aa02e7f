//! Seed the backend with the demo dataset.

use kostpanel_portal::backend::BackendClient;
use kostpanel_portal::backend::types::{AnnouncementPayload, FaqPayload, RoomPayload, RulePayload};

/// The demo rooms.
fn rooms() -> Vec<RoomPayload> {
    let room = |number: &str, status: &str, price: i64, fasilitas: &str, payment: &str| {
        RoomPayload {
            nomor_kamar: number.to_owned(),
            status: status.to_owned(),
            harga_bulanan: price,
            fasilitas: fasilitas.to_owned(),
            judul: None,
            deskripsi: None,
            status_pembayaran: payment.to_owned(),
        }
    };
    vec![
        room("A-01", "terisi", 2_500_000, "AC,TV,Wifi", "Lunas"),
        room("A-02", "terisi", 2_600_000, "AC,Wifi", "Belum Bayar"),
        room("B-01", "kosong", 2_400_000, "Kipas,Wifi", "Belum Bayar"),
        room("B-02", "pending", 2_500_000, "AC,TV,Wifi,Lemari", "Menunggu"),
    ]
}

/// The demo house rules.
fn rules() -> Vec<RulePayload> {
    [
        ("Jam tamu", "Tamu hanya boleh berkunjung pukul 08.00-21.00"),
        ("Kebersihan dapur", "Cuci peralatan masak setelah dipakai"),
        ("Parkir", "Parkir kendaraan hanya di area yang disediakan"),
        ("Ketenangan", "Jaga ketenangan di atas pukul 22.00"),
        ("Sampah", "Buang sampah ke tempat sampah gabungan setiap pagi"),
        ("Listrik", "Matikan alat listrik saat meninggalkan kamar"),
        ("Menginap", "Tamu menginap wajib lapor pengelola"),
        ("Pembayaran", "Sewa dibayar paling lambat tanggal 5 setiap bulan"),
    ]
    .into_iter()
    .map(|(judul, deskripsi)| RulePayload {
        judul: judul.to_owned(),
        deskripsi: deskripsi.to_owned(),
    })
    .collect()
}

/// The demo FAQs.
fn faqs() -> Vec<FaqPayload> {
    [
        ("Bagaimana cara membayar sewa?", "Transfer ke rekening pengelola lalu konfirmasi lewat aplikasi."),
        ("Kapan jatuh tempo pembayaran?", "Tanggal 5 setiap bulan."),
        ("Apakah boleh membawa tamu?", "Boleh, pada jam tamu dan wajib lapor bila menginap."),
        ("Bagaimana jika AC rusak?", "Laporkan ke pengelola, teknisi datang maksimal 2x24 jam."),
        ("Apakah listrik termasuk sewa?", "Ya, pemakaian wajar sudah termasuk."),
        ("Bolehkah memasak di kamar?", "Tidak, gunakan dapur bersama."),
        ("Bagaimana cara pindah kamar?", "Ajukan ke pengelola; pindah mengikuti ketersediaan."),
        ("Apakah ada layanan laundry?", "Ada, dengan biaya terpisah per kilogram."),
        ("Bagaimana keamanan kost?", "Gerbang dikunci pukul 23.00, ada CCTV di area bersama."),
        ("Bagaimana menghentikan sewa?", "Beri tahu pengelola minimal 30 hari sebelumnya."),
    ]
    .into_iter()
    .map(|(pertanyaan, jawaban)| FaqPayload {
        pertanyaan: pertanyaan.to_owned(),
        jawaban: jawaban.to_owned(),
    })
    .collect()
}

/// Push the demo dataset through the backend API.
pub async fn run(backend: &BackendClient, token: &str) -> Result<(), Box<dyn std::error::Error>> {
    for payload in rooms() {
        let room = backend.create_room(token, &payload).await?;
        tracing::info!(number = %room.number, "seeded room");
    }

    for payload in rules() {
        backend.create_rule(token, &payload).await?;
    }
    tracing::info!("seeded house rules");

    for payload in faqs() {
        backend.create_faq(token, &payload).await?;
    }
    tracing::info!("seeded FAQs");

    let announcement = AnnouncementPayload {
        judul: "Selamat datang di Kostpanel".to_owned(),
        isi: "Portal kost sudah aktif. Silakan cek status kamar dan pembayaran di sini."
            .to_owned(),
        tanggal: "2026-08-01".to_owned(),
    };
    backend.create_announcement(token, &announcement).await?;
    tracing::info!("seeded announcement");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The dashboard fallback dataset mirrors this seed; keep them aligned.
    #[test]
    fn seed_counts_match_the_fallback_dataset() {
        assert_eq!(rooms().len(), 4);
        assert_eq!(rules().len(), 8);
        assert_eq!(faqs().len(), 10);
    }

    #[test]
    fn seeded_statuses_are_valid_wire_values() {
        use std::str::FromStr;
        for room in rooms() {
            assert!(kostpanel_core::RoomStatus::from_str(&room.status).is_ok());
            assert!(kostpanel_core::PaymentStatus::from_str(&room.status_pembayaran).is_ok());
        }
    }
}
